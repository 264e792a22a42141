//! Map the on-disk config and CLI overrides onto the typing engine's types.

use std::path::Path;

use typist_common::{ConfigError, UserId};
use typist_config::schema::{LogLevel, TypingConfig, TypistConfig};
use typist_typing::{ResolverPolicy, TrackerConfig};

use crate::cli::Args;

/// Load config from `--config` if given, else from the platform default path.
pub fn load(path: Option<&Path>) -> Result<TypistConfig, ConfigError> {
    match path {
        Some(path) => typist_config::load_config_from(path),
        None => typist_config::load_config(),
    }
}

/// Apply command-line overrides on top of the loaded config.
pub fn apply_overrides(config: &mut TypistConfig, args: &Args) {
    if let Some(ms) = args.idle_timeout_ms {
        config.typing.idle_timeout_ms = ms;
    }
    if let Some(ms) = args.keepalive_ms {
        config.typing.keepalive_enabled = true;
        config.typing.keepalive_interval_ms = ms;
    }
    if let Some(id) = args.user_id {
        config.recipients.own_user_id = id;
    }
}

/// Apply overrides and re-validate. Unlike a bad config file, which falls
/// back to defaults, an out-of-range flag is a usage error.
pub fn with_overrides(
    mut config: TypistConfig,
    args: &Args,
) -> Result<TypistConfig, ConfigError> {
    apply_overrides(&mut config, args);
    typist_config::validation::validate(&config)?;
    Ok(config)
}

/// Pick the log filter: `--log-level`, then `RUST_LOG`, then the config level.
pub fn filter_directive(cli: Option<&str>, env: Option<&str>, level: &LogLevel) -> String {
    cli.or(env)
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(|| level.directive())
        .to_string()
}

pub fn tracker_config(typing: &TypingConfig) -> TrackerConfig {
    TrackerConfig {
        idle_timeout: typing.idle_timeout(),
        keepalive_interval: typing.keepalive_interval(),
    }
}

/// With typing notifications switched off nothing ever resolves, so the
/// tracker stays idle.
pub fn resolver_policy(config: &TypistConfig) -> ResolverPolicy {
    let recipients = &config.recipients;
    let own_user_id = (recipients.own_user_id != 0).then_some(UserId(recipients.own_user_id));
    if !config.typing.enabled {
        return ResolverPolicy {
            own_user_id,
            ..ResolverPolicy::disabled()
        };
    }
    ResolverPolicy {
        own_user_id,
        send_direct: recipients.send_direct,
        send_channel: recipients.send_channel,
        send_edit: recipients.send_edit,
        max_direct_recipients: recipients.max_direct_recipients as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::time::Duration;

    #[test]
    fn overrides_replace_config_values() {
        let mut config = TypistConfig::default();
        let args = Args::try_parse_from([
            "typist",
            "--idle-timeout-ms",
            "2000",
            "--keepalive-ms",
            "9000",
            "--user-id",
            "4",
        ])
        .unwrap();
        apply_overrides(&mut config, &args);

        assert_eq!(config.typing.idle_timeout_ms, 2000);
        assert!(config.typing.keepalive_enabled);
        assert_eq!(config.typing.keepalive_interval_ms, 9000);
        assert_eq!(config.recipients.own_user_id, 4);
    }

    #[test]
    fn no_overrides_keep_config() {
        let mut config = TypistConfig::default();
        config.typing.idle_timeout_ms = 7000;
        let args = Args::try_parse_from(["typist"]).unwrap();
        apply_overrides(&mut config, &args);
        assert_eq!(config.typing.idle_timeout_ms, 7000);
        assert!(!config.typing.keepalive_enabled);
    }

    #[test]
    fn tracker_config_from_typing_section() {
        let mut typing = TypingConfig::default();
        assert_eq!(
            tracker_config(&typing),
            TrackerConfig {
                idle_timeout: Duration::from_secs(5),
                keepalive_interval: None,
            }
        );

        typing.keepalive_enabled = true;
        typing.keepalive_interval_ms = 3000;
        assert_eq!(
            tracker_config(&typing).keepalive_interval,
            Some(Duration::from_secs(3))
        );
    }

    #[test]
    fn resolver_policy_maps_recipients() {
        let mut config = TypistConfig::default();
        config.recipients.own_user_id = 8;
        config.recipients.send_channel = false;
        config.recipients.max_direct_recipients = 12;

        let policy = resolver_policy(&config);
        assert_eq!(policy.own_user_id, Some(UserId(8)));
        assert!(policy.send_direct);
        assert!(!policy.send_channel);
        assert!(policy.send_edit);
        assert_eq!(policy.max_direct_recipients, 12);
    }

    #[test]
    fn unknown_own_user_maps_to_none() {
        let policy = resolver_policy(&TypistConfig::default());
        assert_eq!(policy.own_user_id, None);
    }

    #[test]
    fn disabled_typing_disables_every_kind() {
        let mut config = TypistConfig::default();
        config.typing.enabled = false;
        let policy = resolver_policy(&config);
        assert!(!policy.send_direct);
        assert!(!policy.send_channel);
        assert!(!policy.send_edit);
    }

    #[test]
    fn out_of_range_override_is_rejected() {
        let args = Args::try_parse_from(["typist", "--idle-timeout-ms", "0"]).unwrap();
        let err = with_overrides(TypistConfig::default(), &args).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("idle_timeout_ms"));

        let args = Args::try_parse_from(["typist", "--keepalive-ms", "50"]).unwrap();
        assert!(with_overrides(TypistConfig::default(), &args).is_err());
    }

    #[test]
    fn in_range_override_is_accepted() {
        let args = Args::try_parse_from(["typist", "--idle-timeout-ms", "2500"]).unwrap();
        let config = with_overrides(TypistConfig::default(), &args).unwrap();
        assert_eq!(config.typing.idle_timeout_ms, 2500);
    }

    #[test]
    fn filter_prefers_flag_then_env_then_config() {
        let level = LogLevel::Warning;
        assert_eq!(
            filter_directive(Some("typist=trace"), Some("debug"), &level),
            "typist=trace"
        );
        assert_eq!(filter_directive(None, Some("debug"), &level), "debug");
        assert_eq!(filter_directive(None, None, &level), level.directive());
        assert_eq!(filter_directive(None, Some("  "), &level), level.directive());
    }

    #[test]
    fn load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[recipients]\nown_user_id = 3\n").unwrap();
        let config = load(Some(&path)).unwrap();
        assert_eq!(config.recipients.own_user_id, 3);
    }

    #[test]
    fn load_from_missing_path_fails() {
        let err = load(Some(Path::new("/tmp/typist_no_such_config.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
