//! Configuration schema types for typist.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults the chat client ships with.

mod recipients;
mod system;
mod typing;

pub use recipients::*;
pub use system::*;
pub use typing::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for typist.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct TypistConfig {
    pub typing: TypingConfig,
    pub recipients: RecipientsConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn default_config_has_correct_typing() {
        let config = TypistConfig::default();
        assert!(config.typing.enabled);
        assert_eq!(config.typing.idle_timeout_ms, 5000);
        assert!(!config.typing.keepalive_enabled);
        assert_eq!(config.typing.keepalive_interval_ms, 10000);
    }

    #[test]
    fn default_config_has_correct_recipients() {
        let config = TypistConfig::default();
        assert_eq!(config.recipients.own_user_id, 0);
        assert!(config.recipients.send_direct);
        assert!(config.recipients.send_channel);
        assert!(config.recipients.send_edit);
        assert_eq!(config.recipients.max_direct_recipients, 100);
    }

    #[test]
    fn default_logging_is_info() {
        let config = TypistConfig::default();
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn idle_timeout_as_duration() {
        let config = TypingConfig {
            idle_timeout_ms: 2500,
            ..Default::default()
        };
        assert_eq!(config.idle_timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn keepalive_interval_only_when_enabled() {
        let mut config = TypingConfig::default();
        assert_eq!(config.keepalive_interval(), None);

        config.keepalive_enabled = true;
        assert_eq!(
            config.keepalive_interval(),
            Some(Duration::from_millis(10000))
        );
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let toml_str = r#"
[typing]
idle_timeout_ms = 3000
"#;
        let config: TypistConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.typing.idle_timeout_ms, 3000);
        assert!(config.typing.enabled);
        assert_eq!(config.recipients.max_direct_recipients, 100);
    }

    #[test]
    fn log_level_parses_uppercase() {
        let toml_str = r#"
[logging]
level = "DEBUG"
"#;
        let config: TypistConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(config.logging.level.directive().contains("typist=debug"));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let toml_str = r#"
[logging]
level = "chatty"
"#;
        assert!(toml::from_str::<TypistConfig>(toml_str).is_err());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = TypistConfig::default();
        config.recipients.own_user_id = 17;
        config.typing.keepalive_enabled = true;

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: TypistConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.recipients.own_user_id, 17);
        assert!(parsed.typing.keepalive_enabled);
    }
}
