//! Recipient policy: who typing notifications may be sent to.

use serde::{Deserialize, Serialize};

/// Per-conversation-kind switches and limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipientsConfig {
    /// The local user's id; stripped from direct recipient sets. 0 = unknown.
    pub own_user_id: u64,
    pub send_direct: bool,
    pub send_channel: bool,
    pub send_edit: bool,
    /// Group DMs larger than this never get typing notifications.
    pub max_direct_recipients: u32,
}

impl Default for RecipientsConfig {
    fn default() -> Self {
        Self {
            own_user_id: 0,
            send_direct: true,
            send_channel: true,
            send_edit: true,
            max_direct_recipients: 100,
        }
    }
}
