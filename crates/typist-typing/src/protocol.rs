//! Wire payloads for outbound typing notifications.
//!
//! One [`TypingNotification`] corresponds to one request to the server's
//! typing endpoint: an operation flag plus either the direct recipients,
//! a channel and topic, or the id of the message being edited.

use serde::{Deserialize, Serialize};
use typist_common::{ChannelId, MessageId, UserId};

use crate::recipient::RecipientKey;

/// Whether the user started or stopped typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypingOp {
    Start,
    Stop,
}

/// Which kind of conversation the notification targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationKind {
    Direct,
    Channel,
    Edit,
}

/// Payload sent to the server for one start/stop transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingNotification {
    pub op: TypingOp,
    #[serde(rename = "type")]
    pub kind: ConversationKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<ChannelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<MessageId>,
}

impl TypingNotification {
    pub fn new(op: TypingOp, key: &RecipientKey) -> Self {
        let mut notification = Self {
            op,
            kind: ConversationKind::Direct,
            to: Vec::new(),
            channel_id: None,
            topic: None,
            message_id: None,
        };
        match key {
            RecipientKey::Direct { user_ids } => {
                notification.to = user_ids.clone();
            }
            RecipientKey::Channel { channel_id, topic } => {
                notification.kind = ConversationKind::Channel;
                notification.channel_id = Some(*channel_id);
                notification.topic = Some(topic.clone());
            }
            RecipientKey::Edit { message_id } => {
                notification.kind = ConversationKind::Edit;
                notification.message_id = Some(*message_id);
            }
        }
        notification
    }

    pub fn start(key: &RecipientKey) -> Self {
        Self::new(TypingOp::Start, key)
    }

    pub fn stop(key: &RecipientKey) -> Self {
        Self::new(TypingOp::Stop, key)
    }
}
