//! System configuration types: logging.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// The `tracing` filter directive for this level, scoped to our crates.
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "typist=debug,typist_config=debug,typist_typing=debug",
            LogLevel::Info => "typist=info,typist_config=info,typist_typing=info",
            LogLevel::Warning => "typist=warn,typist_config=warn,typist_typing=warn",
            LogLevel::Error => "typist=error,typist_config=error,typist_typing=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
