//! Validity checks for normalized frequency specs.
//!
//! Checks only report problems. Offending values are kept as entered so the
//! presentation layer can highlight them.

use super::name::FreqSpecName;

/// Default minimum distance between two active normalized frequencies.
pub const MIN_FREQ_STEP: f64 = 1e-4;

/// Result of checking a normalized frequency against `(0, 0.5)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeState {
    /// Strictly between 0 and the Nyquist frequency.
    Valid,
    /// Zero or negative.
    BelowMin,
    /// At or above the Nyquist frequency.
    AtOrAboveHalf,
}

impl RangeState {
    /// Returns true if the value is inside the valid range.
    pub fn is_valid(&self) -> bool {
        matches!(self, RangeState::Valid)
    }

    /// Returns the error message if invalid, None if valid.
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            RangeState::Valid => None,
            RangeState::BelowMin => Some("has to be > 0"),
            RangeState::AtOrAboveHalf => Some("has to be < f_S/2."),
        }
    }
}

/// Classifies a normalized frequency.
///
/// NaN is reported as `BelowMin`.
pub fn check_range(value: f64) -> RangeState {
    if value >= 0.5 {
        RangeState::AtOrAboveHalf
    } else if value > 0.0 {
        RangeState::Valid
    } else {
        RangeState::BelowMin
    }
}

/// Groups of values that lie closer together than the minimum step.
///
/// Indices refer to positions in the sequence passed to [`check_separation`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeparationReport {
    /// Each group holds the indices of mutually close values, ascending by value.
    pub groups: Vec<Vec<usize>>,
}

impl SeparationReport {
    /// Returns true if no collisions were found.
    pub fn is_clear(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns true if `index` belongs to a collision group.
    pub fn contains(&self, index: usize) -> bool {
        self.groups.iter().any(|g| g.contains(&index))
    }
}

/// Finds runs of values whose neighbours are closer than `min_step`.
///
/// Values are sorted first, so the check does not depend on input order and
/// chains like `a ~ b ~ c` end up in one group even when `a` and `c` are
/// farther apart than `min_step`.
pub fn check_separation(values: &[f64], min_step: f64) -> SeparationReport {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut groups = Vec::new();
    let mut run: Vec<usize> = Vec::new();

    for pair in order.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if (values[hi] - values[lo]).abs() < min_step {
            if run.is_empty() {
                run.push(lo);
            }
            run.push(hi);
        } else if !run.is_empty() {
            groups.push(std::mem::take(&mut run));
        }
    }
    if !run.is_empty() {
        groups.push(run);
    }

    SeparationReport { groups }
}

/// Non-fatal finding about the active frequency specs.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationWarning {
    /// A value lies outside `(0, 0.5)`.
    OutOfRange {
        name: FreqSpecName,
        state: RangeState,
    },
    /// Several values are closer together than the minimum step.
    NearDuplicate {
        names: Vec<FreqSpecName>,
        /// Minimum step expressed in Hz.
        min_step_abs: f64,
    },
}

impl ValidationWarning {
    /// Returns a human-readable warning message.
    pub fn message(&self) -> String {
        match self {
            ValidationWarning::OutOfRange { name, state } => format!(
                "Frequency {} {}",
                name,
                state.error_message().unwrap_or("is valid")
            ),
            ValidationWarning::NearDuplicate { min_step_abs, .. } => format!(
                "Frequencies must differ by at least {}",
                super::unit::format_significant(*min_step_abs, 4)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds() {
        assert_eq!(check_range(0.0), RangeState::BelowMin);
        assert_eq!(check_range(-0.1), RangeState::BelowMin);
        assert_eq!(check_range(0.5), RangeState::AtOrAboveHalf);
        assert_eq!(check_range(0.75), RangeState::AtOrAboveHalf);
        assert_eq!(check_range(0.25), RangeState::Valid);
        assert_eq!(check_range(f64::NAN), RangeState::BelowMin);
    }

    #[test]
    fn test_range_messages() {
        assert!(RangeState::Valid.error_message().is_none());
        assert!(RangeState::BelowMin.error_message().unwrap().contains("> 0"));
        assert!(RangeState::AtOrAboveHalf.error_message().unwrap().contains("f_S/2"));
    }

    #[test]
    fn test_near_duplicate_pair() {
        let report = check_separation(&[0.1, 0.10005, 0.3], MIN_FREQ_STEP);
        assert_eq!(report.groups, vec![vec![0, 1]]);
        assert!(!report.contains(2));
    }

    #[test]
    fn test_unsorted_input_and_chain() {
        // 0.2 ~ 0.20008 ~ 0.20016: chained into one group
        let report = check_separation(&[0.20016, 0.4, 0.2, 0.20008], MIN_FREQ_STEP);
        assert_eq!(report.groups, vec![vec![2, 3, 0]]);
        assert!([0, 2, 3].iter().all(|&i| report.contains(i)));
        assert!(!report.contains(1));
    }

    #[test]
    fn test_separate_groups() {
        let report = check_separation(&[0.1, 0.1, 0.3, 0.30001, 0.45], MIN_FREQ_STEP);
        assert_eq!(report.groups, vec![vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn test_clear_report() {
        assert!(check_separation(&[0.1, 0.2, 0.3], MIN_FREQ_STEP).is_clear());
        assert!(check_separation(&[], MIN_FREQ_STEP).is_clear());
        assert!(check_separation(&[0.1], MIN_FREQ_STEP).is_clear());
    }

    #[test]
    fn test_warning_messages() {
        let name = FreqSpecName::new("F_SB").unwrap();
        let warning = ValidationWarning::OutOfRange {
            name: name.clone(),
            state: RangeState::AtOrAboveHalf,
        };
        assert_eq!(warning.message(), "Frequency F_SB has to be < f_S/2.");

        let warning = ValidationWarning::NearDuplicate {
            names: vec![name],
            min_step_abs: 4.8,
        };
        assert_eq!(warning.message(), "Frequencies must differ by at least 4.8");
    }
}
