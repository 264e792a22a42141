//! Single-threaded event loop around one tracker.
//!
//! Input events and fired timers are pulled from two channels by one task
//! and applied to the tracker one at a time, in arrival order. Nothing
//! else touches the tracker, so no locking is needed.

use tokio::sync::mpsc;
use tracing::{debug, debug_span, info};
use typist_common::SessionId;

use crate::feed::InputEvent;
use crate::recipient::RecipientResolver;
use crate::sink::TypingSink;
use crate::timer::{TimerFired, Timestamp, TokioScheduler};
use crate::tracker::{TrackerConfig, TypingTracker};

/// Drives a [`TypingTracker`] from an input feed using real time.
pub struct TypingDriver<S> {
    session_id: SessionId,
    tracker: TypingTracker<S, TokioScheduler>,
    resolver: RecipientResolver,
    fired_rx: mpsc::UnboundedReceiver<TimerFired>,
}

impl<S: TypingSink> TypingDriver<S> {
    /// Must be used from within a tokio runtime.
    pub fn new(config: TrackerConfig, resolver: RecipientResolver, sink: S) -> Self {
        let (scheduler, fired_rx) = TokioScheduler::new();
        Self {
            session_id: SessionId::new(),
            tracker: TypingTracker::new(config, sink, scheduler),
            resolver,
            fired_rx,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn tracker(&self) -> &TypingTracker<S, TokioScheduler> {
        &self.tracker
    }

    /// Milliseconds on the scheduler's clock, so timer deadlines and
    /// activity times share one timeline.
    fn now(&self) -> Timestamp {
        self.tracker.scheduler().now()
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        let _span = debug_span!("typing", session = %self.session_id.short()).entered();
        let now = self.now();
        match event {
            InputEvent::ContentChanged {
                context,
                has_content,
            } => {
                let key = self.resolver.resolve_input(&context, has_content);
                self.tracker.update(key, now);
            }
            InputEvent::EpisodeEnded { reason } => {
                if self.tracker.stop(now) {
                    debug!(session = %self.session_id.short(), ?reason, "episode ended");
                }
            }
        }
    }

    pub fn handle_timer(&mut self, fired: TimerFired) {
        let _span = debug_span!("typing", session = %self.session_id.short()).entered();
        let now = self.now();
        self.tracker.on_timer(fired, now);
    }

    /// Run until `feed` closes, then end any open episode and return the sink.
    pub async fn run(mut self, mut feed: mpsc::Receiver<InputEvent>) -> S {
        info!(session = %self.session_id.short(), "typing driver started");

        loop {
            tokio::select! {
                biased;
                event = feed.recv() => match event {
                    Some(event) => self.handle_input(event),
                    None => break,
                },
                Some(fired) = self.fired_rx.recv() => self.handle_timer(fired),
            }
        }

        let now = self.now();
        self.tracker.stop(now);
        info!(session = %self.session_id.short(), "typing driver stopped");
        self.tracker.into_sink()
    }
}
