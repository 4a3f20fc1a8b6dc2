use crate::accessors::{Image, TaskId};
use crate::geometry::{Insets, Rect};
use serde::{Deserialize, Serialize};

/// Messages sent from the proxy to the recents service.
///
/// Delivery is best-effort: messages sent around a disconnect may be
/// dropped, and no variant expects a synchronous reply. The configuration
/// request is answered asynchronously by an
/// [`InboundMessage::UpdateConfiguration`] push.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Ask the service to recompute animation geometry for the current
    /// window bounds and system insets.
    UpdateConfiguration { window: Rect, system_insets: Insets },
    /// Ask the service to warm up its task list ahead of a show.
    PreloadTasks,
    /// Cancel a previously requested preload.
    CancelPreloadTasks,
    /// Request remote dismissal of the recents surface.
    HideRecents { from_alt_source: bool },
    /// Request the already-foregrounded surface to toggle itself closed.
    ToggleRecents,
    /// Notify the service that the enter animation has begun.
    StartEnterAnimation,
}

/// Messages pushed from the recents service to the proxy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Reply to an `UpdateConfiguration` request: the precomputed first-task
    /// destination rects for the 1, 2, and 3+ task layouts.
    UpdateConfiguration {
        single: Rect,
        two: Rect,
        multiple: Rect,
    },
    /// A refreshed thumbnail for a task. Forwarded to the host; the core
    /// state machine does not consume it.
    UpdateTaskThumbnail { task_id: TaskId, thumbnail: Image },
    /// Show request looped back from the service. Handled locally as a
    /// no-op pass-through at this layer.
    ShowRecents,
}
