//! Core TOML config loading: read from path or platform default.

use std::path::Path;

use tracing::{info, warn};
use typist_common::ConfigError;

use super::paths::{create_default_config, default_config_path};
use crate::schema::TypistConfig;
use crate::validation;

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
/// After loading, the config is validated; if validation fails, a warning
/// is logged and the parsed config is returned as-is.
pub fn load_from_path(path: &Path) -> Result<TypistConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: TypistConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), error = %e, "config has out-of-range values");
    }

    info!(path = %path.display(), "typing config loaded");
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On Linux: `~/.config/typist/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<TypistConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!(path = %path.display(), "no typing config yet, writing template");
            create_default_config(&path)?;
            Ok(TypistConfig::default())
        }
        Err(e) => Err(e),
    }
}
