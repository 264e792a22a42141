//! Typing-notification timing configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing policy for outbound typing notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    /// Master switch. When off, input is consumed but nothing is sent.
    pub enabled: bool,
    /// Quiet period after the last edit before "stopped typing" is sent
    /// (valid range: 1000-60000).
    pub idle_timeout_ms: u64,
    /// Re-send "typing" periodically while an episode lasts.
    pub keepalive_enabled: bool,
    /// Keep-alive cadence (valid range: 1000-120000).
    pub keepalive_interval_ms: u64,
}

impl TypingConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    /// Keep-alive cadence, or `None` when keep-alive is switched off.
    pub fn keepalive_interval(&self) -> Option<Duration> {
        self.keepalive_enabled
            .then(|| Duration::from_millis(self.keepalive_interval_ms))
    }
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            idle_timeout_ms: 5000,
            keepalive_enabled: false,
            keepalive_interval_ms: 10000,
        }
    }
}
