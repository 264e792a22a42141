//! Where start/stop decisions go.
//!
//! The tracker calls a [`TypingSink`] and forgets about it. Delivery is the
//! sink's business: failures are logged here and never reach the tracker,
//! whose local state stays authoritative.

use tokio::sync::mpsc;
use tracing::warn;

use crate::protocol::{TypingNotification, TypingOp};
use crate::recipient::RecipientKey;

/// Receiver of typing transitions.
pub trait TypingSink {
    /// A new typing episode began for `key`.
    fn notify_start(&mut self, key: &RecipientKey);

    /// The episode for `key` ended.
    fn notify_stop(&mut self, key: &RecipientKey);

    /// The episode for `key` is still going. Defaults to a repeated start.
    fn notify_keepalive(&mut self, key: &RecipientKey) {
        self.notify_start(key);
    }
}

impl<T: TypingSink + ?Sized> TypingSink for Box<T> {
    fn notify_start(&mut self, key: &RecipientKey) {
        (**self).notify_start(key);
    }

    fn notify_stop(&mut self, key: &RecipientKey) {
        (**self).notify_stop(key);
    }

    fn notify_keepalive(&mut self, key: &RecipientKey) {
        (**self).notify_keepalive(key);
    }
}

// ---------------------------------------------------------------------------
// Channel sink
// ---------------------------------------------------------------------------

/// Forwards wire payloads to whoever owns the network connection.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<TypingNotification>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<TypingNotification>) -> Self {
        Self { tx }
    }

    /// Create a sink together with the receiving end of its channel.
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<TypingNotification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    fn send(&self, notification: TypingNotification) {
        let op = notification.op;
        if self.tx.send(notification).is_err() {
            warn!(?op, "typing notification dropped: receiver closed");
        }
    }
}

impl TypingSink for ChannelSink {
    fn notify_start(&mut self, key: &RecipientKey) {
        self.send(TypingNotification::new(TypingOp::Start, key));
    }

    fn notify_stop(&mut self, key: &RecipientKey) {
        self.send(TypingNotification::new(TypingOp::Stop, key));
    }
}

// ---------------------------------------------------------------------------
// Recording sink
// ---------------------------------------------------------------------------

/// One call made on a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    Start(RecipientKey),
    Stop(RecipientKey),
    KeepAlive(RecipientKey),
}

/// Sink that remembers every call, in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: Vec<SinkCall>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[SinkCall] {
        &self.calls
    }

    /// Drain the recorded calls.
    pub fn take(&mut self) -> Vec<SinkCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn starts(&self) -> usize {
        self.count(|call| matches!(call, SinkCall::Start(_)))
    }

    pub fn stops(&self) -> usize {
        self.count(|call| matches!(call, SinkCall::Stop(_)))
    }

    pub fn keepalives(&self) -> usize {
        self.count(|call| matches!(call, SinkCall::KeepAlive(_)))
    }

    fn count(&self, pred: impl Fn(&SinkCall) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }
}

impl TypingSink for RecordingSink {
    fn notify_start(&mut self, key: &RecipientKey) {
        self.calls.push(SinkCall::Start(key.clone()));
    }

    fn notify_stop(&mut self, key: &RecipientKey) {
        self.calls.push(SinkCall::Stop(key.clone()));
    }

    fn notify_keepalive(&mut self, key: &RecipientKey) {
        self.calls.push(SinkCall::KeepAlive(key.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typist_common::{MessageId, UserId};

    #[test]
    fn channel_sink_forwards_wire_payloads() {
        let (mut sink, mut rx) = ChannelSink::pair();
        let key = RecipientKey::direct([UserId(3), UserId(1)]);

        sink.notify_start(&key);
        sink.notify_keepalive(&key);
        sink.notify_stop(&key);

        let ops: Vec<TypingOp> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|n| n.op)
            .collect();
        assert_eq!(ops, vec![TypingOp::Start, TypingOp::Start, TypingOp::Stop]);
    }

    #[test]
    fn channel_sink_survives_closed_receiver() {
        let (mut sink, rx) = ChannelSink::pair();
        drop(rx);
        // Logged and dropped, never a panic.
        sink.notify_start(&RecipientKey::edit(MessageId(1)));
        sink.notify_stop(&RecipientKey::edit(MessageId(1)));
    }

    #[test]
    fn recording_sink_keeps_order() {
        let mut sink = RecordingSink::new();
        let a = RecipientKey::edit(MessageId(1));
        let b = RecipientKey::edit(MessageId(2));

        sink.notify_start(&a);
        sink.notify_stop(&a);
        sink.notify_start(&b);
        sink.notify_keepalive(&b);

        assert_eq!(sink.starts(), 2);
        assert_eq!(sink.stops(), 1);
        assert_eq!(sink.keepalives(), 1);
        assert_eq!(
            sink.take(),
            vec![
                SinkCall::Start(a.clone()),
                SinkCall::Stop(a),
                SinkCall::Start(b.clone()),
                SinkCall::KeepAlive(b),
            ]
        );
        assert!(sink.calls().is_empty());
    }

    #[test]
    fn boxed_sink_delegates() {
        let mut sink: Box<RecordingSink> = Box::default();
        let key = RecipientKey::edit(MessageId(9));
        TypingSink::notify_keepalive(&mut sink, &key);
        assert_eq!(sink.calls(), &[SinkCall::KeepAlive(key)]);
    }
}
