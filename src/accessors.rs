//! Platform accessor abstractions.
//!
//! The proxy never touches task lists, displays, or screenshot capture
//! directly; a host process supplies implementations of these traits.
//! The abstraction also allows for mock implementations in tests.

use crate::geometry::Rect;
use anyhow::Result;
use serde::{Deserialize, Serialize};

pub type TaskId = i64;

/// Identity of an activity component, used to recognize the recents
/// surface among running tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentName {
    pub package: String,
    pub class: String,
}

impl ComponentName {
    pub fn new(package: impl Into<String>, class: impl Into<String>) -> Self {
        ComponentName {
            package: package.into(),
            class: class.into(),
        }
    }
}

/// A running or recent task as reported by the platform.
///
/// Derived fresh per request; never cached across invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInfo {
    pub id: TaskId,
    /// The component at the top of the task's activity stack.
    pub top_component: ComponentName,
}

/// An opaque captured image. The core only ever checks usability and
/// forwards the pixels; compositing happens elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Image {
    /// An image with no area cannot seed a thumbnail transition.
    pub fn is_usable(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Task-list and display queries consumed by the toggle state machine.
///
/// Mirrors the host's system-services surface; every method is a fresh
/// query, and capture methods may legitimately come back empty.
pub trait SystemServices {
    /// The most-recent running tasks, front-most first.
    fn list_running_tasks(&mut self, limit: usize) -> Result<Vec<TaskInfo>>;

    /// The most-recent tasks for the current user, most-recent first.
    fn list_recent_tasks(&mut self, limit: usize) -> Result<Vec<TaskInfo>>;

    /// Whether the task belongs to the home/launcher stack.
    fn is_task_in_home_stack(&mut self, id: TaskId) -> Result<bool>;

    /// A thumbnail for the task, if the platform has one.
    fn capture_task_thumbnail(&mut self, id: TaskId) -> Result<Option<Image>>;

    /// A screenshot of the entire display, if capture is possible.
    fn capture_full_display(&mut self) -> Result<Option<Image>>;

    /// Bounds of the default display.
    fn current_display_bounds(&mut self) -> Result<Rect>;

    fn status_bar_inset_height(&mut self) -> i32;

    fn navigation_bar_inset_height(&mut self) -> i32;
}

/// The connection transport to the remote recents service.
///
/// `bind` is fire-and-forget: the eventual connect or disconnect is
/// delivered back to the proxy event loop as a service event, never as a
/// return value.
pub trait ServiceTransport {
    fn bind(&mut self) -> Result<()>;

    fn unbind(&mut self);
}
