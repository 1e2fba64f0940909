//! Error types for frequency specification handling.

use thiserror::Error;

/// Errors raised while evaluating the raw text of an edit.
///
/// A parse failure never touches stored values; the caller redisplays the
/// previous text instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Nothing but whitespace was entered
    #[error("Empty input")]
    Empty,

    /// Text is not a valid number or arithmetic expression
    #[error("Cannot evaluate '{text}' as a number")]
    Invalid { text: String },

    /// Expression evaluated to infinity or NaN
    #[error("'{text}' does not evaluate to a finite number")]
    NonFinite { text: String },

    /// Expression divides by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Negative value where only non-negative values are accepted
    #[error("'{text}' must not be negative")]
    Negative { text: String },
}

/// Errors surfaced to the presentation layer by the frequency spec core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FreqSpecError {
    /// Parameter name has never been stored
    #[error("Unknown frequency parameter: {0}")]
    NotFound(String),

    /// Text is not a valid frequency parameter identifier
    #[error("Invalid frequency parameter name: '{0}'")]
    InvalidName(String),

    /// Unit tag is not one of the known display units
    #[error("Unknown frequency unit: '{0}'")]
    UnknownUnit(String),

    /// Sampling frequency is zero, negative or not finite
    #[error("Invalid sampling frequency: {0} (must be > 0)")]
    InvalidSamplingFrequency(f64),

    /// Edit text could not be evaluated
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type for frequency spec operations
pub type Result<T> = std::result::Result<T, FreqSpecError>;
