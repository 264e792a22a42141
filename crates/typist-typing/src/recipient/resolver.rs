use serde::{Deserialize, Serialize};
use tracing::trace;
use typist_common::{ChannelId, MessageId, UserId};

use super::RecipientKey;

/// What the user is currently composing, as reported by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComposeContext {
    /// A new direct message; recipients in the order they were picked.
    #[serde(rename = "direct")]
    DirectMessage { user_ids: Vec<UserId> },
    /// A new channel message. The channel may not be chosen yet.
    #[serde(rename = "channel")]
    ChannelMessage {
        channel_id: Option<ChannelId>,
        #[serde(default)]
        topic: String,
    },
    /// Editing a message that was already sent.
    #[serde(rename = "edit")]
    EditMessage { message_id: MessageId },
}

/// User-level switches deciding which conversations get typing notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverPolicy {
    /// Removed from direct recipient sets when known.
    pub own_user_id: Option<UserId>,
    pub send_direct: bool,
    pub send_channel: bool,
    pub send_edit: bool,
    /// Larger group DMs never get typing notifications.
    pub max_direct_recipients: usize,
}

impl Default for ResolverPolicy {
    fn default() -> Self {
        Self {
            own_user_id: None,
            send_direct: true,
            send_channel: true,
            send_edit: true,
            max_direct_recipients: 100,
        }
    }
}

impl ResolverPolicy {
    /// A policy under which nothing resolves.
    pub fn disabled() -> Self {
        Self {
            send_direct: false,
            send_channel: false,
            send_edit: false,
            ..Self::default()
        }
    }
}

/// Turns compose context into canonical [`RecipientKey`]s.
#[derive(Debug, Clone, Default)]
pub struct RecipientResolver {
    policy: ResolverPolicy,
}

impl RecipientResolver {
    pub fn new(policy: ResolverPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ResolverPolicy {
        &self.policy
    }

    /// Canonical key for `context`, or `None` when there is nobody to notify.
    pub fn resolve(&self, context: &ComposeContext) -> Option<RecipientKey> {
        match context {
            ComposeContext::DirectMessage { user_ids } => self.resolve_direct(user_ids),
            ComposeContext::ChannelMessage { channel_id, topic } => {
                if !self.policy.send_channel {
                    return None;
                }
                let channel_id = channel_id.filter(|id| id.0 != 0)?;
                Some(RecipientKey::channel(channel_id, topic.trim()))
            }
            ComposeContext::EditMessage { message_id } => {
                if !self.policy.send_edit || message_id.0 == 0 {
                    return None;
                }
                Some(RecipientKey::edit(*message_id))
            }
        }
    }

    /// Like [`resolve`](Self::resolve), but an empty compose box never
    /// resolves.
    pub fn resolve_input(&self, context: &ComposeContext, has_content: bool) -> Option<RecipientKey> {
        if !has_content {
            return None;
        }
        self.resolve(context)
    }

    fn resolve_direct(&self, user_ids: &[UserId]) -> Option<RecipientKey> {
        if !self.policy.send_direct {
            return None;
        }
        let own = self.policy.own_user_id;
        let key = RecipientKey::direct(
            user_ids
                .iter()
                .copied()
                .filter(|id| id.0 != 0 && Some(*id) != own),
        );
        let RecipientKey::Direct { user_ids } = &key else {
            return None;
        };
        if user_ids.is_empty() {
            return None;
        }
        if user_ids.len() > self.policy.max_direct_recipients {
            trace!(
                recipients = user_ids.len(),
                max = self.policy.max_direct_recipients,
                "group too large for typing notifications"
            );
            return None;
        }
        Some(key)
    }
}
