//! Specs module
//!
//! Frequency specification building blocks: typed names, units, storage,
//! validation, sorting and rescaling of normalized band edges.

pub mod context;
pub mod name;
pub mod parse;
pub mod rescale;
pub mod sort;
pub mod store;
pub mod unit;
pub mod validation;

pub use context::SamplingContext;
pub use name::{BandKind, FreqSpecName};
pub use parse::{evaluate, SignPolicy};
pub use rescale::{change_sampling_frequency, rescale, RescaledSpec};
pub use sort::sort;
pub use store::{ActiveSpecSet, SpecStore};
pub use unit::{format_significant, from_display, to_display, DisplayFormat, FreqUnit};
pub use validation::{
    check_range, check_separation, RangeState, SeparationReport, ValidationWarning, MIN_FREQ_STEP,
};
