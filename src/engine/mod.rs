//! Engine module
//!
//! The frequency spec core and the command/event messages that drive it.

pub mod commands;
pub mod freq_specs;

pub use commands::{FreqSpecCommand, FreqSpecEvent};
pub use freq_specs::{DisplayRow, FieldStatus, FreqSpecs, MAX_PENDING_EVENTS};
