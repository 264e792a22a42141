//! Outbound typing notifications for the chat client.
//!
//! A [`TypingTracker`] turns "the user is editing something for these
//! recipients" into exactly one start and one stop per typing episode,
//! with an inactivity timeout. The UI reports what is being composed via
//! an [`InputFeed`]; a [`RecipientResolver`] maps that to a canonical
//! [`RecipientKey`]; a [`TypingSink`] carries decisions to the server.
//! [`TypingDriver`] wires these onto one tokio task.

pub mod driver;
pub mod feed;
pub mod protocol;
pub mod recipient;
pub mod sink;
pub mod timer;
pub mod tracker;

pub use driver::TypingDriver;
pub use feed::{EndReason, InputEvent, InputFeed};
pub use protocol::{ConversationKind, TypingNotification, TypingOp};
pub use recipient::{ComposeContext, RecipientKey, RecipientResolver, ResolverPolicy};
pub use sink::{ChannelSink, RecordingSink, SinkCall, TypingSink};
pub use timer::{
    ManualScheduler, Scheduler, Timer, TimerFired, TimerHandle, TimerKind, Timestamp,
    TokioScheduler,
};
pub use tracker::{StopCause, TrackerConfig, TypingSession, TypingTracker};
