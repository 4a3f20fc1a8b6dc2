use crate::accessors::ServiceTransport;
use crate::channel::MessageChannel;
use anyhow::Result;
use tracing::{debug, info};

/// Lifecycle of the long-running connection to the recents service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Unbound,
    Binding,
    Bound,
}

/// Owns the asynchronous bind/connect/disconnect lifecycle and the
/// single-slot replay latch.
///
/// The latch records whether a user-triggered show/toggle arrived before
/// the service was bound; it is consumed exactly once when the connect
/// completes (or when the first configuration reply lands, if geometry was
/// not yet ready). A later request while Binding overwrites the latch but
/// never queues a second replay.
pub struct ConnectionManager<T: ServiceTransport> {
    state: ConnectionState,
    replay_on_connect: bool,
    channel: Option<MessageChannel>,
    transport: T,
}

impl<T: ServiceTransport> ConnectionManager<T> {
    pub fn new(transport: T) -> Self {
        ConnectionManager {
            state: ConnectionState::Unbound,
            replay_on_connect: false,
            channel: None,
            transport,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_bound(&self) -> bool {
        self.state == ConnectionState::Bound
    }

    /// The outbound channel, present only while Bound.
    pub fn channel(&self) -> Option<&MessageChannel> {
        self.channel.as_ref()
    }

    /// Request a connection to the recents service.
    ///
    /// Returns `true` if the connection is already Bound and the caller
    /// should replay its action synchronously. Otherwise records
    /// `replay_on_connect` in the latch and, if Unbound, issues exactly one
    /// transport bind; requesting again while Binding only updates the
    /// latch.
    pub fn request_connection(&mut self, replay_on_connect: bool) -> Result<bool> {
        match self.state {
            ConnectionState::Bound => Ok(replay_on_connect),
            ConnectionState::Binding => {
                debug!(
                    "Already binding, recording replay_on_connect={}",
                    replay_on_connect
                );
                self.replay_on_connect = replay_on_connect;
                Ok(false)
            }
            ConnectionState::Unbound => {
                self.replay_on_connect = replay_on_connect;
                self.transport.bind()?;
                self.state = ConnectionState::Binding;
                info!("Binding to recents service");
                Ok(false)
            }
        }
    }

    /// Connect completed; store the fresh channel handle.
    pub fn on_connected(&mut self, channel: MessageChannel) {
        info!("Recents service connected");
        self.channel = Some(channel);
        self.state = ConnectionState::Bound;
    }

    /// Connection lost. The replay latch survives so that a reconnection
    /// can still honor a deferred action.
    pub fn on_disconnected(&mut self) {
        info!("Recents service disconnected");
        self.channel = None;
        self.state = ConnectionState::Unbound;
    }

    /// Consume the replay latch.
    pub fn take_replay(&mut self) -> bool {
        std::mem::take(&mut self.replay_on_connect)
    }

    pub fn replay_pending(&self) -> bool {
        self.replay_on_connect
    }

    /// Drop the transport binding entirely.
    pub fn unbind(&mut self) {
        self.transport.unbind();
        self.channel = None;
        self.state = ConnectionState::Unbound;
    }
}
