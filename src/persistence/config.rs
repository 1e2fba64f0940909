//! Configuration for the frequency spec core.
//!
//! Stored as JSON. Every field has a default so partial files load fine.

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::{PersistenceError, PersistenceResult};
use crate::specs::{FreqSpecName, SignPolicy, MIN_FREQ_STEP};

/// Tunables for validation, display and new parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreqSpecsConfig {
    /// Minimum distance between two active normalized frequencies.
    pub min_freq_step: f64,
    /// Significant digits for fields without focus.
    pub significant_digits: usize,
    /// Handling of negative edit results.
    pub sign_policy: SignPolicy,
    /// Initial normalized value for names without a preset.
    pub default_value: f64,
    /// Initial normalized values by parameter name.
    pub presets: BTreeMap<String, f64>,
}

impl FreqSpecsConfig {
    /// Initial value for a parameter that is about to be created.
    pub fn initial_value(&self, name: &FreqSpecName) -> f64 {
        self.presets
            .get(name.as_str())
            .copied()
            .unwrap_or(self.default_value)
    }
}

impl Default for FreqSpecsConfig {
    fn default() -> Self {
        let presets = [
            ("F_PB", 0.1),
            ("F_SB", 0.2),
            ("F_SB2", 0.3),
            ("F_PB2", 0.4),
            ("F_C", 0.2),
            ("F_C2", 0.4),
            ("F_N", 0.2),
            ("F_N2", 0.4),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();

        Self {
            min_freq_step: MIN_FREQ_STEP,
            significant_digits: 3,
            sign_policy: SignPolicy::Magnitude,
            default_value: 0.25,
            presets,
        }
    }
}

/// Loads a JSON config of any type with a default.
///
/// A missing or unreadable file is logged and yields `T::default()`.
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        log::info!("load_config: {:?} not found, using defaults", path);
        return T::default();
    }

    let loaded = std::fs::read_to_string(path)
        .map_err(PersistenceError::from)
        .and_then(|json| serde_json::from_str(&json).map_err(PersistenceError::from));
    loaded.unwrap_or_else(|e| {
        log::warn!("load_config: {:?}: {}, using defaults", path, e);
        T::default()
    })
}

/// Writes `config` as pretty JSON, creating parent directories.
pub fn save_config<T: Serialize>(config: &T, path: &Path) -> PersistenceResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(config)?)?;
    log::info!("save_config: wrote {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FreqSpecsConfig::default();
        assert_eq!(config.min_freq_step, 1e-4);
        assert_eq!(config.significant_digits, 3);
        assert_eq!(config.sign_policy, SignPolicy::Magnitude);
    }

    #[test]
    fn test_initial_value_uses_presets() {
        let config = FreqSpecsConfig::default();
        assert_eq!(config.initial_value(&FreqSpecName::new("F_SB").unwrap()), 0.2);
        assert_eq!(config.initial_value(&FreqSpecName::new("F_X9").unwrap()), 0.25);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: FreqSpecsConfig =
            serde_json::from_str(r#"{ "significant_digits": 5, "sign_policy": "any" }"#).unwrap();
        assert_eq!(config.significant_digits, 5);
        assert_eq!(config.sign_policy, SignPolicy::Any);
        assert_eq!(config.min_freq_step, MIN_FREQ_STEP);
        assert!(config.presets.contains_key("F_PB"));
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let config: FreqSpecsConfig = load_config(Path::new("/nonexistent/path/freq_specs.json"));
        assert_eq!(config, FreqSpecsConfig::default());
    }

    #[test]
    fn test_load_invalid_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_config::<FreqSpecsConfig>(&path), FreqSpecsConfig::default());
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("freq_specs.json");

        let config = FreqSpecsConfig {
            min_freq_step: 1e-3,
            significant_digits: 4,
            ..Default::default()
        };
        save_config(&config, &path).unwrap();
        assert_eq!(load_config::<FreqSpecsConfig>(&path), config);
    }

    #[test]
    fn test_load_other_config_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("digits.json");

        save_config(&BTreeMap::from([("digits".to_string(), 5usize)]), &path).unwrap();
        let loaded: BTreeMap<String, usize> = load_config(&path);
        assert_eq!(loaded.get("digits"), Some(&5));

        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(load_config::<BTreeMap<String, usize>>(&path).is_empty());
    }
}
