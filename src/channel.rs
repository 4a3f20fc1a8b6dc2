use crate::message::OutboundMessage;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Outbound handle to the remote recents service.
///
/// Sends are asynchronous and at-most-once: a send onto a torn-down
/// endpoint is logged and dropped, never surfaced to the caller. The next
/// user action re-attempts naturally through the connection state machine,
/// so there is no retry here.
///
/// The handle is replaced wholesale on reconnect; it is never mutated in
/// place.
#[derive(Debug, Clone)]
pub struct MessageChannel {
    tx: mpsc::UnboundedSender<OutboundMessage>,
}

impl MessageChannel {
    /// Wrap a transport-provided sender.
    pub fn new(tx: mpsc::UnboundedSender<OutboundMessage>) -> Self {
        MessageChannel { tx }
    }

    /// Create a connected channel/receiver pair. The transport adapter
    /// drains the receiver onto the wire; tests inspect it directly.
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<OutboundMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (MessageChannel { tx }, rx)
    }

    /// Fire-and-forget send.
    pub fn send(&self, message: OutboundMessage) {
        debug!("Sending {:?}", message);
        if self.tx.send(message).is_err() {
            // Remote endpoint is gone; the connection callback will move
            // the state machine to Unbound shortly.
            warn!("Dropped outbound message, service endpoint is gone");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_delivers_in_order() {
        let (channel, mut rx) = MessageChannel::pair();
        channel.send(OutboundMessage::ToggleRecents);
        channel.send(OutboundMessage::StartEnterAnimation);

        assert_eq!(rx.try_recv().unwrap(), OutboundMessage::ToggleRecents);
        assert_eq!(rx.try_recv().unwrap(), OutboundMessage::StartEnterAnimation);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_send_on_dead_endpoint_is_silent() {
        let (channel, rx) = MessageChannel::pair();
        drop(rx);
        // Must not panic or surface an error
        channel.send(OutboundMessage::ToggleRecents);
    }
}
