//! Input events from the UI layer.
//!
//! The UI reports two things: the compose/edit text may have changed, and
//! the episode ended (sent, cancelled, or the box closed). How those are
//! wired to keystrokes is up to the UI.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use typist_common::TypistError;

use crate::recipient::ComposeContext;

/// Why the user stopped composing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Sent,
    Cancelled,
    Closed,
}

/// One signal from the compose or message-edit box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    /// Text may have changed. `has_content` is false for an empty box.
    ContentChanged {
        context: ComposeContext,
        #[serde(default = "default_has_content")]
        has_content: bool,
    },
    /// The episode is over regardless of timers.
    EpisodeEnded { reason: EndReason },
}

fn default_has_content() -> bool {
    true
}

impl InputEvent {
    /// Parse one JSON line, as written by UI glue.
    pub fn parse_line(line: &str) -> Result<Self, TypistError> {
        serde_json::from_str(line.trim())
            .map_err(|e| TypistError::Feed(format!("malformed input event: {e}")))
    }
}

/// Sending half of the feed, handed to UI glue.
#[derive(Debug, Clone)]
pub struct InputFeed {
    tx: mpsc::Sender<InputEvent>,
}

impl InputFeed {
    /// Create a feed and the receiver a driver consumes.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<InputEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    pub async fn content_changed(
        &self,
        context: ComposeContext,
        has_content: bool,
    ) -> Result<(), TypistError> {
        self.send(InputEvent::ContentChanged {
            context,
            has_content,
        })
        .await
    }

    pub async fn episode_ended(&self, reason: EndReason) -> Result<(), TypistError> {
        self.send(InputEvent::EpisodeEnded { reason }).await
    }

    pub async fn send(&self, event: InputEvent) -> Result<(), TypistError> {
        self.tx
            .send(event)
            .await
            .map_err(|_| TypistError::Feed("typing driver has stopped".into()))
    }
}
