//! The single active typing episode.

use crate::recipient::RecipientKey;
use crate::timer::{TimerHandle, Timestamp};

/// The outbound typing notification currently being tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingSession {
    pub recipient_key: RecipientKey,
    pub started_at: Timestamp,
    pub last_activity_time: Timestamp,
    /// Last time a start or keep-alive went out.
    pub last_notified_at: Timestamp,
    /// A start was sent and no matching stop yet.
    pub notified_started: bool,
    pub(crate) generation: u64,
    pub(crate) idle_timer: Option<TimerHandle>,
    pub(crate) keepalive_timer: Option<TimerHandle>,
}

impl TypingSession {
    pub(crate) fn new(recipient_key: RecipientKey, generation: u64, now: Timestamp) -> Self {
        Self {
            recipient_key,
            started_at: now,
            last_activity_time: now,
            last_notified_at: now,
            notified_started: false,
            generation,
            idle_timer: None,
            keepalive_timer: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Milliseconds since the last observed input.
    pub fn idle_for(&self, now: Timestamp) -> u64 {
        now.saturating_sub(self.last_activity_time)
    }

    /// Take every pending timer handle, leaving none behind.
    pub(crate) fn take_timers(&mut self) -> impl Iterator<Item = TimerHandle> {
        self.idle_timer.take().into_iter().chain(self.keepalive_timer.take())
    }
}
