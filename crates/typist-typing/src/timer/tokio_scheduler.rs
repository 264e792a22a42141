//! Real-time scheduler backed by tokio sleep tasks.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::trace;

use super::{Scheduler, Timer, TimerFired, TimerHandle, Timestamp};

/// Scheduler that spawns one sleep task per timer and reports fired timers
/// on an unbounded channel.
///
/// Timestamps are milliseconds since the scheduler was created; see
/// [`now`](Self::now). `schedule` must be called from within a tokio
/// runtime. A timer that
/// elapses just before it is cancelled may still be delivered; consumers
/// are expected to recognise such stale timers.
pub struct TokioScheduler {
    fired_tx: mpsc::UnboundedSender<TimerFired>,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    next_handle: u64,
    origin: Instant,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver its fired timers arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerFired>) {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            fired_tx,
            tasks: HashMap::new(),
            next_handle: 0,
            origin: Instant::now(),
        };
        (scheduler, fired_rx)
    }

    /// Milliseconds elapsed since the scheduler was created.
    pub fn now(&self) -> Timestamp {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Number of timers that have neither fired nor been cancelled.
    pub fn pending_count(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, now: Timestamp, delay: Duration, timer: Timer) -> TimerHandle {
        self.tasks.retain(|_, task| !task.is_finished());

        self.next_handle += 1;
        let handle = TimerHandle::new(self.next_handle);
        let deadline = self.origin + Duration::from_millis(now) + delay;
        let fired_tx = self.fired_tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if fired_tx.send(TimerFired { handle, timer }).is_err() {
                trace!(handle = handle.raw(), "timer fired after scheduler was dropped");
            }
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let (mut sched, mut fired_rx) = TokioScheduler::new();
        let start = tokio::time::Instant::now();
        let handle = sched.schedule(0, Duration::from_millis(250), Timer::idle(3));

        let fired = fired_rx.recv().await.unwrap();
        assert_eq!(fired.handle, handle);
        assert_eq!(fired.timer, Timer::idle(3));
        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let (mut sched, mut fired_rx) = TokioScheduler::new();
        let cancelled = sched.schedule(0, Duration::from_millis(100), Timer::idle(1));
        let kept = sched.schedule(0, Duration::from_millis(200), Timer::idle(2));
        sched.cancel(cancelled);

        let fired = fired_rx.recv().await.unwrap();
        assert_eq!(fired.handle, kept);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(fired_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_fire_is_noop() {
        let (mut sched, mut fired_rx) = TokioScheduler::new();
        let handle = sched.schedule(0, Duration::from_millis(10), Timer::keepalive(1));
        fired_rx.recv().await.unwrap();

        sched.cancel(handle);
        sched.cancel(handle);
        assert_eq!(sched.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_is_anchored_to_given_time() {
        let (mut sched, mut fired_rx) = TokioScheduler::new();
        let start = tokio::time::Instant::now();
        tokio::time::sleep(Duration::from_millis(400)).await;

        // Armed for an event observed at t=100, so due at t=600 rather than t=900.
        sched.schedule(100, Duration::from_millis(500), Timer::idle(1));
        fired_rx.recv().await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(600));
        assert!(elapsed < Duration::from_millis(900));
    }

    #[tokio::test(start_paused = true)]
    async fn pending_count_tracks_outstanding_timers() {
        let (mut sched, _fired_rx) = TokioScheduler::new();
        sched.schedule(0, Duration::from_secs(5), Timer::idle(1));
        let second = sched.schedule(0, Duration::from_secs(5), Timer::keepalive(1));
        assert_eq!(sched.pending_count(), 2);

        sched.cancel(second);
        assert_eq!(sched.pending_count(), 1);
    }
}
