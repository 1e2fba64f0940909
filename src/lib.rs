//! Frequency Specs Library
//!
//! Keeps the band-edge frequencies of a filter design (`F_SB`, `F_PB`, ...)
//! normalized to the sampling frequency, ordered and validated, and converts
//! them to and from the display unit chosen by the user.

pub mod engine;
pub mod error;
pub mod persistence;
pub mod specs;

pub use engine::{FieldStatus, FreqSpecCommand, FreqSpecEvent, FreqSpecs};
pub use error::{FreqSpecError, ParseError, Result};
