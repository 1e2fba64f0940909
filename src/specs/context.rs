//! Sampling frequency context shared by all frequency specs.

use serde::{Deserialize, Serialize};

use crate::error::{FreqSpecError, Result};
use super::unit::FreqUnit;

/// Sampling frequency and the policies that depend on it.
///
/// `f_s_prev` is only meaningful while a sampling frequency change is being
/// applied; afterwards it equals `f_s`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplingContext {
    /// Current sampling frequency in Hz.
    pub f_s: f64,
    /// Sampling frequency before the last change, in Hz.
    pub f_s_prev: f64,
    /// Keep absolute frequencies when `f_s` changes.
    pub freq_locked: bool,
    /// Keep active frequency specs sorted in ascending order.
    pub freq_specs_sort: bool,
    /// Unit used for display and editing.
    pub unit: FreqUnit,
}

impl SamplingContext {
    /// Creates a context with the given sampling frequency.
    ///
    /// Sorting is enabled, locking is disabled and values are shown relative
    /// to `f_s`.
    pub fn new(f_s: f64) -> Result<Self> {
        check_sampling_frequency(f_s)?;
        Ok(Self {
            f_s,
            f_s_prev: f_s,
            freq_locked: false,
            freq_specs_sort: true,
            unit: FreqUnit::Fs,
        })
    }

    /// Converts a normalized frequency to Hz.
    pub fn to_absolute(&self, normalized: f64) -> f64 {
        normalized * self.f_s
    }
}

impl Default for SamplingContext {
    fn default() -> Self {
        Self {
            f_s: 1.0,
            f_s_prev: 1.0,
            freq_locked: false,
            freq_specs_sort: true,
            unit: FreqUnit::Fs,
        }
    }
}

/// Fails unless `f_s` is a finite, strictly positive frequency.
pub fn check_sampling_frequency(f_s: f64) -> Result<()> {
    if f_s.is_finite() && f_s > 0.0 {
        Ok(())
    } else {
        Err(FreqSpecError::InvalidSamplingFrequency(f_s))
    }
}
