//! Full configuration validation.
//!
//! Validates numeric ranges per section. Each section has its own
//! function; this orchestrator calls them all and collects errors into a
//! single `ConfigError`.

mod helpers;
mod sections;


use typist_common::ConfigError;

use crate::schema::TypistConfig;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &TypistConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sections::validate_typing(&mut errors, config);
    sections::validate_recipients(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
