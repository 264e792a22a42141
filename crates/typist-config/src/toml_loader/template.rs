//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# typist configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[typing]
# enabled = true
# idle_timeout_ms = 5000          # 1000-60000, quiet period before "stop"
# keepalive_enabled = false
# keepalive_interval_ms = 10000   # 1000-120000, re-send "start" while typing

[recipients]
# own_user_id = 0                 # 0 = unknown; stripped from DM recipients
# send_direct = true
# send_channel = true
# send_edit = true
# max_direct_recipients = 100     # 1-1000

[logging]
# level = "INFO"                  # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
