//! Recalculation of normalized frequencies after a sampling frequency change.
//!
//! Normalized values don't depend on `f_S`, so usually nothing needs to be
//! recalculated. With `freq_locked` set, absolute frequencies are kept instead:
//! `new = old * f_S_prev / f_S`.

use crate::error::Result;
use super::context::{check_sampling_frequency, SamplingContext};
use super::name::FreqSpecName;
use super::store::{ActiveSpecSet, SpecStore};

/// A parameter whose normalized value was recalculated.
#[derive(Clone, Debug, PartialEq)]
pub struct RescaledSpec {
    pub name: FreqSpecName,
    pub old: f64,
    pub new: f64,
}

/// Rescales the active specs from `ctx.f_s_prev` to `ctx.f_s`.
///
/// Does nothing to the store unless `ctx.freq_locked` is set. On success
/// `ctx.f_s_prev` is set to `ctx.f_s`. On failure neither the store nor the
/// context is modified.
pub fn rescale(
    ctx: &mut SamplingContext,
    active: &ActiveSpecSet,
    store: &mut SpecStore,
) -> Result<Vec<RescaledSpec>> {
    check_sampling_frequency(ctx.f_s)?;
    check_sampling_frequency(ctx.f_s_prev)?;

    let mut rescaled = Vec::new();
    if ctx.freq_locked {
        let ratio = ctx.f_s_prev / ctx.f_s;
        // Read everything before writing so a missing name leaves the store intact
        let old_values = store.get_active(active)?;
        rescaled = active
            .iter()
            .zip(old_values)
            .map(|(name, old)| RescaledSpec {
                name: name.clone(),
                old,
                new: old * ratio,
            })
            .collect();

        for spec in &rescaled {
            log::debug!(
                "rescale: f_S {} -> {}, {}: {} -> {}",
                ctx.f_s_prev,
                ctx.f_s,
                spec.name,
                spec.old,
                spec.new
            );
            store.set(spec.name.clone(), spec.new);
        }
    }

    ctx.f_s_prev = ctx.f_s;
    Ok(rescaled)
}

/// Switches `ctx` to `new_f_s` and rescales the active specs.
///
/// A non-positive or non-finite `new_f_s` fails without touching anything.
pub fn change_sampling_frequency(
    ctx: &mut SamplingContext,
    new_f_s: f64,
    active: &ActiveSpecSet,
    store: &mut SpecStore,
) -> Result<Vec<RescaledSpec>> {
    check_sampling_frequency(new_f_s)?;

    let mut next = *ctx;
    next.f_s_prev = ctx.f_s;
    next.f_s = new_f_s;
    let rescaled = rescale(&mut next, active, store)?;
    *ctx = next;
    Ok(rescaled)
}
