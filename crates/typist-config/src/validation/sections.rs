//! Validation for the typing and recipients sections.

use crate::schema::TypistConfig;

use super::helpers::validate_range;

/// Validate typing timing constraints.
pub(crate) fn validate_typing(errors: &mut Vec<String>, config: &TypistConfig) {
    validate_range(
        errors,
        "typing.idle_timeout_ms",
        config.typing.idle_timeout_ms,
        1000,
        60000,
    );
    // Only meaningful when the pings are actually sent.
    if config.typing.keepalive_enabled {
        validate_range(
            errors,
            "typing.keepalive_interval_ms",
            config.typing.keepalive_interval_ms,
            1000,
            120000,
        );
    }
}

/// Validate recipient policy constraints.
pub(crate) fn validate_recipients(errors: &mut Vec<String>, config: &TypistConfig) {
    validate_range(
        errors,
        "recipients.max_direct_recipients",
        config.recipients.max_direct_recipients.into(),
        1,
        1000,
    );
}
