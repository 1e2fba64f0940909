//! Persistence module
//!
//! Snapshot and configuration save/load using serde and JSON.

pub mod config;
pub mod error;
pub mod snapshot;

pub use config::{load_config, save_config, FreqSpecsConfig};
pub use error::{PersistenceError, PersistenceResult};
pub use snapshot::{load_from_file, save_to_file, SpecSnapshot, SNAPSHOT_VERSION};
