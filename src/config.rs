//! Configuration management for the ontology editor core
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (ontology.toml)
//! - Environment variables (ONTOLOGY_*)
//!
//! ## Example config file (ontology.toml):
//! ```toml
//! [validation]
//! debounce_ms = 1000
//! auto_validate = true
//!
//! [simulator]
//! min_match_score = 2
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Main configuration for the ontology editor
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OntologyConfig {
    /// Validation engine settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Query simulator settings
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

/// Validation engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Quiet period after an edit before re-validation fires
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Re-validate automatically on every schema change
    #[serde(default = "default_true")]
    pub auto_validate: bool,
}

/// Query simulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Minimum keyword score for a question to match a use case
    #[serde(default = "default_min_match_score")]
    pub min_match_score: u32,
}

// Default value functions
fn default_debounce_ms() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}

fn default_min_match_score() -> u32 {
    2
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            auto_validate: true,
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            min_match_score: default_min_match_score(),
        }
    }
}

impl OntologyConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["ontology.toml", ".ontology.toml", "config/ontology.toml"];
        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // A path given explicitly must exist
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Environment variables (ONTOLOGY_*)
        builder = builder.add_source(
            Environment::with_prefix("ONTOLOGY")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = OntologyConfig::default();
        assert_eq!(config.validation.debounce_ms, 1000);
        assert!(config.validation.auto_validate);
        assert_eq!(config.simulator.min_match_score, 2);
    }

    #[test]
    fn test_serialize_config() {
        let config = OntologyConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[validation]"));
        assert!(toml_str.contains("[simulator]"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ontology.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[validation]\ndebounce_ms = 250\nauto_validate = false").unwrap();

        let config = OntologyConfig::load_from(path.to_str()).unwrap();
        assert_eq!(config.validation.debounce_ms, 250);
        assert!(!config.validation.auto_validate);
        // Untouched section keeps its defaults
        assert_eq!(config.simulator.min_match_score, 2);
    }
}
