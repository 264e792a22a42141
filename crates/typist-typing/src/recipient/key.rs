use std::fmt;

use serde::{Deserialize, Serialize};
use typist_common::{ChannelId, MessageId, UserId};

/// Who a typing notification concerns.
///
/// Keys produced by [`RecipientResolver`](super::RecipientResolver) are
/// canonical: direct recipients are sorted and deduplicated, so two keys
/// for the same conversation always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecipientKey {
    /// A new direct message to one or more users.
    Direct { user_ids: Vec<UserId> },
    /// A new message to a channel topic.
    Channel { channel_id: ChannelId, topic: String },
    /// An edit of an existing message.
    Edit { message_id: MessageId },
}

impl RecipientKey {
    /// Build a direct key in canonical form.
    pub fn direct(user_ids: impl IntoIterator<Item = UserId>) -> Self {
        let mut user_ids: Vec<UserId> = user_ids.into_iter().collect();
        user_ids.sort_unstable();
        user_ids.dedup();
        RecipientKey::Direct { user_ids }
    }

    pub fn channel(channel_id: ChannelId, topic: impl Into<String>) -> Self {
        RecipientKey::Channel {
            channel_id,
            topic: topic.into(),
        }
    }

    pub fn edit(message_id: MessageId) -> Self {
        RecipientKey::Edit { message_id }
    }

    /// Whether the key is well formed: non-zero ids, and a non-empty,
    /// strictly ascending direct recipient list.
    pub fn is_valid(&self) -> bool {
        match self {
            RecipientKey::Direct { user_ids } => {
                !user_ids.is_empty()
                    && user_ids.iter().all(|id| id.0 != 0)
                    && user_ids.windows(2).all(|pair| pair[0] < pair[1])
            }
            RecipientKey::Channel { channel_id, .. } => channel_id.0 != 0,
            RecipientKey::Edit { message_id } => message_id.0 != 0,
        }
    }
}

impl fmt::Display for RecipientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipientKey::Direct { user_ids } => {
                f.write_str("direct:")?;
                for (i, id) in user_ids.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{id}")?;
                }
                Ok(())
            }
            RecipientKey::Channel { channel_id, topic } => {
                write!(f, "channel:{channel_id}:{topic}")
            }
            RecipientKey::Edit { message_id } => write!(f, "edit:{message_id}"),
        }
    }
}
