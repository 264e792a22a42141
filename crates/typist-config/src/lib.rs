//! typist configuration system.
//!
//! Provides TOML-based configuration with full validation. All config
//! sections use defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use typist_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{TypistConfig, CONFIG_SCHEMA_VERSION};

use std::path::Path;

use typist_common::ConfigError;

/// Load config from the platform default path and validate it.
///
/// Creates `config.toml` with a commented template if none exists.
pub fn load_config() -> Result<TypistConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path (e.g. a `--config` override) and validate it.
pub fn load_config_from(path: &Path) -> Result<TypistConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &TypistConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = TypistConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"typing\""));
        assert!(json.contains("\"recipients\""));
        assert!(json.contains("\"logging\""));
        assert!(json.contains("\"idle_timeout_ms\": 5000"));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = TypistConfig::default();
        let json = config_to_json(&config);
        let parsed: TypistConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.typing.idle_timeout_ms, 5000);
        assert_eq!(parsed.recipients.max_direct_recipients, 100);
    }

    #[test]
    fn load_config_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[typing]\nidle_timeout_ms = 10\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn load_config_from_accepts_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[recipients]\nsend_edit = false\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert!(!config.recipients.send_edit);
    }
}
