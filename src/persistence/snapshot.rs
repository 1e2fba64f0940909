//! Snapshot serialization of the frequency spec state.
//!
//! A snapshot captures every stored frequency spec together with the sampling
//! context, so the enclosing session file can restore the exact state later.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{PersistenceError, PersistenceResult};
use crate::specs::context::check_sampling_frequency;
use crate::specs::{FreqSpecName, SamplingContext, SpecStore};

/// Current snapshot format version.
/// Increment this when making breaking changes to the format.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized frequency spec state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecSnapshot {
    /// Snapshot format version for future compatibility.
    pub version: u32,
    /// Sampling frequency, policies and display unit.
    pub context: SamplingContext,
    /// Normalized values by parameter name, including inactive ones.
    pub specs: BTreeMap<String, f64>,
}

impl SpecSnapshot {
    /// Captures the given context and store.
    pub fn capture(context: &SamplingContext, store: &SpecStore) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            context: *context,
            specs: store
                .iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }

    /// Check if this snapshot version is compatible with the current format.
    pub fn is_compatible(&self) -> bool {
        self.version <= SNAPSHOT_VERSION
    }

    /// Rebuilds the store, validating every name and the sampling frequency.
    pub fn to_store(&self) -> PersistenceResult<SpecStore> {
        check_sampling_frequency(self.context.f_s)
            .map_err(|e| PersistenceError::Invalid(e.to_string()))?;

        self.specs
            .iter()
            .map(|(name, &value)| {
                FreqSpecName::new(name)
                    .map(|name| (name, value))
                    .map_err(|e| PersistenceError::Invalid(e.to_string()))
            })
            .collect()
    }
}

/// Save a snapshot to a JSON file.
pub fn save_to_file(snapshot: &SpecSnapshot, path: &Path) -> PersistenceResult<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json)?;
    log::debug!("save_to_file: {} specs written to {:?}", snapshot.specs.len(), path);
    Ok(())
}

/// Load a snapshot from a JSON file.
pub fn load_from_file(path: &Path) -> PersistenceResult<SpecSnapshot> {
    let json = std::fs::read_to_string(path)?;
    let snapshot: SpecSnapshot = serde_json::from_str(&json)?;

    if !snapshot.is_compatible() {
        return Err(PersistenceError::IncompatibleVersion {
            found: snapshot.version,
            expected: SNAPSHOT_VERSION,
        });
    }

    Ok(snapshot)
}
