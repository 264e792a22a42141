//! Virtual-clock scheduler. Time only moves when the caller says so.

use std::collections::BTreeMap;
use std::time::Duration;

use super::{delay_millis, Scheduler, Timer, TimerFired, TimerHandle, Timestamp};

/// Scheduler whose clock is advanced explicitly.
///
/// Due timers are popped in deadline order; timers sharing a deadline come
/// out in the order they were scheduled.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Timestamp,
    next_handle: u64,
    /// Keyed by (deadline, handle) so iteration order is firing order.
    pending: BTreeMap<(Timestamp, u64), Timer>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the virtual clock at `now` instead of zero.
    pub fn starting_at(now: Timestamp) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its deadline.
    pub fn pop_due(&mut self, until: Timestamp) -> Option<(Timestamp, TimerFired)> {
        let (&(deadline, raw), _) = self.pending.iter().next()?;
        if deadline > until {
            return None;
        }
        let timer = self.pending.remove(&(deadline, raw))?;
        self.now = self.now.max(deadline);
        Some((
            deadline,
            TimerFired {
                handle: TimerHandle::new(raw),
                timer,
            },
        ))
    }

    /// Move the clock forward to `now`. The clock never runs backwards.
    pub fn set_now(&mut self, now: Timestamp) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, now: Timestamp, delay: Duration, timer: Timer) -> TimerHandle {
        self.next_handle += 1;
        let deadline = now.saturating_add(delay_millis(delay));
        self.pending.insert((deadline, self.next_handle), timer);
        TimerHandle::new(self.next_handle)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|(_, raw), _| *raw != handle.raw());
    }
}
