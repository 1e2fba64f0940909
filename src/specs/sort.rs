//! Ascending ordering of the active frequency specs.
//!
//! Sorting moves values between slots, not names: after sorting, slot `i`
//! holds the `i`-th smallest value no matter which parameter owned it before.
//! With slots `[F_SB, F_PB]` holding `[0.2, 0.1]`, sorting stores `0.1` under
//! `F_SB` and `0.2` under `F_PB`.

use super::store::ActiveSpecSet;

/// Returns the slot values in ascending order when `sort_enabled` is set,
/// otherwise unchanged.
pub fn sort(active: &ActiveSpecSet, values: &[f64], sort_enabled: bool) -> Vec<f64> {
    debug_assert_eq!(active.len(), values.len(), "one value per active slot");

    let mut sorted = values.to_vec();
    if sort_enabled {
        sorted.sort_by(f64::total_cmp);
    }
    sorted
}
