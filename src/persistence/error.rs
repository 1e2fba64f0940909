//! Persistence error types

use thiserror::Error;

/// Errors that can occur while saving or loading snapshots and config
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// File I/O error
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Snapshot written by a newer format version
    #[error("Incompatible snapshot version: found {found}, expected <= {expected}")]
    IncompatibleVersion { found: u32, expected: u32 },

    /// Snapshot holds an unusable sampling context
    #[error("Invalid snapshot: {0}")]
    Invalid(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;
