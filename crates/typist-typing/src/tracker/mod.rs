//! Typing state machine.
//!
//! Decides when to tell the server "I am typing" and "I stopped typing"
//! from a stream of recipient updates, explicit stops and fired timers.
//!
//! # Transitions
//!
//! ```text
//! Idle   --update(Some(k))-----------> Typing(k)   start(k), arm idle (+ keep-alive)
//! Typing(k) --update(Some(k))--------> Typing(k)   re-arm idle
//! Typing(k) --update(Some(j)), j!=k--> Typing(j)   stop(k), start(j)
//! Typing(k) --update(None)-----------> Idle        stop(k)
//! Typing(k) --stop()-----------------> Idle        stop(k)
//! Typing(k) --idle timer-------------> Idle        stop(k)
//! Typing(k) --keep-alive timer-------> Typing(k)   keepalive(k), re-arm keep-alive
//! Idle   --update(None) | stop()-----> Idle        nothing
//! ```
//!
//! Every timer is armed relative to the `now` passed with the call that
//! armed it, so the idle stop lands one full timeout after the last
//! activity the caller reported.
//!
//! Timers are stamped with the session generation they were armed for and
//! checked against the live session's handles, so a timer that fires after
//! its session was superseded does nothing.

mod session;


use std::time::Duration;

use tracing::{debug, trace};

pub use session::TypingSession;

use crate::recipient::RecipientKey;
use crate::sink::TypingSink;
use crate::timer::{ManualScheduler, Scheduler, Timer, TimerFired, TimerKind, Timestamp};

/// Timing policy for the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Quiet period after which an episode ends on its own.
    pub idle_timeout: Duration,
    /// Re-announce cadence while an episode lasts; `None` disables it.
    pub keepalive_interval: Option<Duration>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(5),
            keepalive_interval: None,
        }
    }
}

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopCause {
    RecipientChanged,
    Explicit,
    IdleTimeout,
}

/// Owns the single active [`TypingSession`] and the timers that end it.
pub struct TypingTracker<S, C> {
    config: TrackerConfig,
    sink: S,
    scheduler: C,
    session: Option<TypingSession>,
    generation: u64,
}

impl<S: TypingSink, C: Scheduler> TypingTracker<S, C> {
    pub fn new(config: TrackerConfig, sink: S, scheduler: C) -> Self {
        Self {
            config,
            sink,
            scheduler,
            session: None,
            generation: 0,
        }
    }

    /// Feed the recipient the user is currently typing to. `None` means the
    /// current context has no valid target. Malformed keys count as `None`.
    pub fn update(&mut self, new_key: Option<RecipientKey>, now: Timestamp) {
        let new_key = new_key.filter(|key| {
            let valid = key.is_valid();
            if !valid {
                debug!(key = %key, "ignoring malformed recipient key");
            }
            valid
        });

        let changed = self
            .session
            .as_ref()
            .is_some_and(|session| Some(&session.recipient_key) != new_key.as_ref());
        if changed {
            self.end_session(now, StopCause::RecipientChanged);
        }

        let Some(key) = new_key else {
            return;
        };

        match self.session.as_mut() {
            Some(session) => {
                session.last_activity_time = now;
                if let Some(handle) = session.idle_timer.take() {
                    self.scheduler.cancel(handle);
                }
                session.idle_timer = Some(self.scheduler.schedule(
                    now,
                    self.config.idle_timeout,
                    Timer::idle(session.generation),
                ));
                trace!(key = %session.recipient_key, "typing activity refreshed");
            }
            None => self.begin_session(key, now),
        }
    }

    /// End the current episode now, e.g. because the message was sent or
    /// the compose box was closed. Returns whether a stop was emitted.
    pub fn stop(&mut self, now: Timestamp) -> bool {
        self.end_session(now, StopCause::Explicit)
    }

    /// Handle a timer delivered by the scheduler. Stale timers are ignored.
    pub fn on_timer(&mut self, fired: TimerFired, now: Timestamp) {
        let Some(session) = self.session.as_mut() else {
            trace!(handle = fired.handle.raw(), "timer fired with no active session");
            return;
        };
        if fired.timer.generation != session.generation {
            trace!(
                handle = fired.handle.raw(),
                generation = fired.timer.generation,
                current = session.generation,
                "ignoring timer from superseded session"
            );
            return;
        }

        match fired.timer.kind {
            TimerKind::Idle => {
                if session.idle_timer != Some(fired.handle) {
                    trace!(handle = fired.handle.raw(), "ignoring replaced idle timer");
                    return;
                }
                // Already fired; nothing left to cancel.
                session.idle_timer = None;
                self.end_session(now, StopCause::IdleTimeout);
            }
            TimerKind::KeepAlive => {
                if session.keepalive_timer != Some(fired.handle) {
                    trace!(handle = fired.handle.raw(), "ignoring replaced keep-alive timer");
                    return;
                }
                session.keepalive_timer = None;
                let Some(interval) = self.config.keepalive_interval else {
                    return;
                };
                self.sink.notify_keepalive(&session.recipient_key);
                session.last_notified_at = now;
                session.keepalive_timer = Some(self.scheduler.schedule(
                    now,
                    interval,
                    Timer::keepalive(session.generation),
                ));
                debug!(key = %session.recipient_key, "typing keep-alive sent");
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn current_key(&self) -> Option<&RecipientKey> {
        self.session.as_ref().map(|s| &s.recipient_key)
    }

    pub fn session(&self) -> Option<&TypingSession> {
        self.session.as_ref()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn scheduler(&self) -> &C {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut C {
        &mut self.scheduler
    }

    /// Consume the tracker and hand back its sink. Pending timers are not
    /// cancelled; call [`stop`](Self::stop) first to end the episode.
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn begin_session(&mut self, key: RecipientKey, now: Timestamp) {
        self.generation += 1;
        let mut session = TypingSession::new(key, self.generation, now);

        self.sink.notify_start(&session.recipient_key);
        session.notified_started = true;

        session.idle_timer = Some(self.scheduler.schedule(
            now,
            self.config.idle_timeout,
            Timer::idle(session.generation),
        ));
        session.keepalive_timer = self.config.keepalive_interval.map(|interval| {
            self.scheduler
                .schedule(now, interval, Timer::keepalive(session.generation))
        });

        debug!(
            key = %session.recipient_key,
            generation = session.generation,
            "typing started"
        );
        self.session = Some(session);
    }

    fn end_session(&mut self, now: Timestamp, cause: StopCause) -> bool {
        let Some(mut session) = self.session.take() else {
            return false;
        };
        for handle in session.take_timers() {
            self.scheduler.cancel(handle);
        }
        if !session.notified_started {
            return false;
        }
        self.sink.notify_stop(&session.recipient_key);
        debug!(
            key = %session.recipient_key,
            ?cause,
            duration_ms = now.saturating_sub(session.started_at),
            "typing stopped"
        );
        true
    }
}

impl<S: TypingSink> TypingTracker<S, ManualScheduler> {
    /// Move the virtual clock to `now`, delivering every timer that falls
    /// due on the way at its own deadline. Returns how many fired.
    pub fn advance_to(&mut self, now: Timestamp) -> usize {
        let mut fired_count = 0;
        while let Some((deadline, fired)) = self.scheduler.pop_due(now) {
            self.on_timer(fired, deadline);
            fired_count += 1;
        }
        self.scheduler.set_now(now);
        fired_count
    }
}
