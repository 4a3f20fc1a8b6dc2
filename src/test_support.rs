//! Shared mock collaborators for unit tests.

use crate::accessors::{ComponentName, Image, ServiceTransport, SystemServices, TaskId, TaskInfo};
use crate::geometry::Rect;
use crate::transition::{ActivityLauncher, LaunchRequest};
use anyhow::{anyhow, Result};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

pub fn make_task(id: TaskId, package: &str) -> TaskInfo {
    TaskInfo {
        id,
        top_component: ComponentName::new(package, format!("{}.Main", package)),
    }
}

pub fn make_image(width: u32, height: u32) -> Image {
    Image {
        width,
        height,
        pixels: Vec::new(),
    }
}

#[derive(Debug)]
pub struct MockState {
    pub running: Vec<TaskInfo>,
    pub recent: Vec<TaskInfo>,
    pub home_stack: HashSet<TaskId>,
    pub thumbnails: HashMap<TaskId, Image>,
    pub full_display: Option<Image>,
    pub display_bounds: Rect,
    pub status_bar_height: i32,
    pub navigation_bar_height: i32,
}

/// Scriptable [`SystemServices`]. Clones share state, so a test can keep a
/// handle and mutate the world while the controller owns its copy.
#[derive(Clone)]
pub struct MockServices {
    state: Arc<Mutex<MockState>>,
}

impl MockServices {
    pub fn new() -> Self {
        MockServices {
            state: Arc::new(Mutex::new(MockState {
                running: Vec::new(),
                recent: Vec::new(),
                home_stack: HashSet::new(),
                thumbnails: HashMap::new(),
                full_display: None,
                display_bounds: Rect::new(0, 0, 1080, 1920),
                status_bar_height: 38,
                navigation_bar_height: 48,
            })),
        }
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }
}

impl SystemServices for MockServices {
    fn list_running_tasks(&mut self, limit: usize) -> Result<Vec<TaskInfo>> {
        Ok(self.state().running.iter().take(limit).cloned().collect())
    }

    fn list_recent_tasks(&mut self, limit: usize) -> Result<Vec<TaskInfo>> {
        Ok(self.state().recent.iter().take(limit).cloned().collect())
    }

    fn is_task_in_home_stack(&mut self, id: TaskId) -> Result<bool> {
        Ok(self.state().home_stack.contains(&id))
    }

    fn capture_task_thumbnail(&mut self, id: TaskId) -> Result<Option<Image>> {
        Ok(self.state().thumbnails.get(&id).cloned())
    }

    fn capture_full_display(&mut self) -> Result<Option<Image>> {
        Ok(self.state().full_display.clone())
    }

    fn current_display_bounds(&mut self) -> Result<Rect> {
        Ok(self.state().display_bounds)
    }

    fn status_bar_inset_height(&mut self) -> i32 {
        self.state().status_bar_height
    }

    fn navigation_bar_inset_height(&mut self) -> i32 {
        self.state().navigation_bar_height
    }
}

/// [`ActivityLauncher`] that records every launch request; can be scripted
/// to fail as if the launch target did not exist.
#[derive(Clone)]
pub struct RecordingLauncher {
    launches: Arc<Mutex<Vec<LaunchRequest>>>,
    pub target_missing: Arc<Mutex<bool>>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        RecordingLauncher {
            launches: Arc::new(Mutex::new(Vec::new())),
            target_missing: Arc::new(Mutex::new(false)),
        }
    }

    pub fn launches(&self) -> Vec<LaunchRequest> {
        self.launches.lock().unwrap().clone()
    }
}

impl ActivityLauncher for RecordingLauncher {
    fn start_cross_process_activity(&mut self, request: LaunchRequest) -> Result<()> {
        if *self.target_missing.lock().unwrap() {
            return Err(anyhow!("activity not found: {:?}", request.component));
        }
        self.launches.lock().unwrap().push(request);
        Ok(())
    }
}

/// [`ServiceTransport`] that counts bind/unbind calls.
#[derive(Clone)]
pub struct RecordingTransport {
    pub bind_calls: Arc<AtomicUsize>,
    pub unbind_calls: Arc<AtomicUsize>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        RecordingTransport {
            bind_calls: Arc::new(AtomicUsize::new(0)),
            unbind_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn binds(&self) -> usize {
        self.bind_calls.load(Ordering::SeqCst)
    }
}

impl ServiceTransport for RecordingTransport {
    fn bind(&mut self) -> Result<()> {
        self.bind_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn unbind(&mut self) {
        self.unbind_calls.fetch_add(1, Ordering::SeqCst);
    }
}
