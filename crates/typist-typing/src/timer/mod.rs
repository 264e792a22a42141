//! Cancellable delayed callbacks.
//!
//! The tracker never touches wall-clock timers directly. It asks a
//! [`Scheduler`] to hand a [`Timer`] back after a delay, and receives it
//! as a [`TimerFired`] on the same loop that feeds it input. Two
//! schedulers exist: [`TokioScheduler`] for real time and
//! [`ManualScheduler`] for a virtual clock driven by the caller.

mod manual;
mod tokio_scheduler;

use std::time::Duration;

pub use manual::ManualScheduler;
pub use tokio_scheduler::TokioScheduler;

/// Milliseconds since an arbitrary, caller-chosen origin.
pub type Timestamp = u64;

/// Identifies one scheduled timer. Never reused by the scheduler that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// What a timer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Ends the episode after a quiet period.
    Idle,
    /// Re-announces an ongoing episode.
    KeepAlive,
}

/// Payload handed back when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timer {
    pub kind: TimerKind,
    /// Session generation the timer was armed for.
    pub generation: u64,
}

impl Timer {
    pub fn idle(generation: u64) -> Self {
        Self {
            kind: TimerKind::Idle,
            generation,
        }
    }

    pub fn keepalive(generation: u64) -> Self {
        Self {
            kind: TimerKind::KeepAlive,
            generation,
        }
    }
}

/// A timer that has elapsed without being cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerFired {
    pub handle: TimerHandle,
    pub timer: Timer,
}

/// Schedules delayed delivery of [`Timer`]s.
///
/// Delivery is always asynchronous with respect to `schedule`: a timer is
/// never handed back from inside the call that armed it.
///
/// Deadlines are anchored to the caller's `now`, not to whatever the
/// scheduler last observed, so a timer armed at `now` falls due at
/// `now + delay` on the scheduler's timeline.
pub trait Scheduler {
    /// Arrange for `timer` to be delivered back at `now + delay`.
    fn schedule(&mut self, now: Timestamp, delay: Duration, timer: Timer) -> TimerHandle;

    /// Cancel a pending timer. Fired, cancelled, or unknown handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

pub(crate) fn delay_millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}
