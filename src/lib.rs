//! A proxy mediating show/hide/toggle recents requests between a
//! UI-owning host process and a separate recents-rendering service.
//!
//! The crate owns the persistent service connection, the asynchronous
//! message protocol for configuration sync and lifecycle control, and the
//! debounced toggle state machine that picks between a thumbnail
//! transition, a generic transition, or a remote close command. Platform
//! specifics (task lists, screenshot capture, activity launches, the
//! connection transport) are supplied by the host through the traits in
//! [`accessors`] and [`transition`].
//!
//! Embed it by constructing a [`proxy::RecentsProxy`] with your adapters,
//! spawning its `run` loop on a tokio runtime, and driving it through the
//! returned [`proxy::ProxyHandle`] and [`proxy::ServiceEventSender`].

pub mod accessors;
pub mod channel;
pub mod config;
pub mod connection;
pub mod controller;
pub mod geometry;
pub mod message;
pub mod proxy;
pub mod transition;

#[cfg(test)]
pub(crate) mod test_support;

pub use accessors::{ComponentName, Image, ServiceTransport, SystemServices, TaskId, TaskInfo};
pub use channel::MessageChannel;
pub use config::ProxyConfig;
pub use connection::ConnectionState;
pub use controller::ToggleController;
pub use geometry::{AnimationRectSet, Insets, Rect};
pub use message::{InboundMessage, OutboundMessage};
pub use proxy::{ProxyHandle, ProxyRequest, RecentsProxy, ServiceEvent, ServiceEventSender};
pub use transition::{ActivityLauncher, AnimationDescriptor, LaunchRequest, UiAnchor};
