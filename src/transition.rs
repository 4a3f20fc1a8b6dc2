use crate::accessors::{ComponentName, Image, SystemServices, TaskInfo};
use crate::geometry::{AnimationRectSet, Rect};
use anyhow::Result;
use tracing::debug;

/// Named animation resources for the generic (non-thumbnail) transition.
pub const GENERIC_ENTER_ANIMATION: &str = "recents_from_launcher_enter";
pub const GENERIC_EXIT_ANIMATION: &str = "recents_from_launcher_exit";

/// An opaque handle to the UI element the enter animation attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiAnchor(pub u64);

/// How the cross-process launch should animate.
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationDescriptor {
    /// Scale down from a preview image into the destination rect.
    /// `source_crop_top` trims the status bar off a full-display capture.
    ThumbnailScale {
        thumbnail: Image,
        source_crop_top: i32,
    },
    /// Plain cross-fade/slide using fixed animation resources.
    Custom {
        enter: &'static str,
        exit: &'static str,
    },
}

/// An asynchronous cross-process activity launch.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRequest {
    pub component: ComponentName,
    pub action: String,
    pub new_task: bool,
    pub exclude_from_recents: bool,
    pub animating_with_thumbnail: bool,
    pub from_alt_source: bool,
    pub destination: Option<Rect>,
    pub animation: AnimationDescriptor,
    pub anchor: Option<UiAnchor>,
}

/// Cross-process activity start, supplied by the host.
///
/// The launch is fire-and-forget; when the launch animation actually
/// begins, the host delivers an animation-started event back to the proxy
/// event loop. A missing launch target surfaces as an error here and is
/// swallowed (with logging) by the caller.
pub trait ActivityLauncher {
    fn start_cross_process_activity(&mut self, request: LaunchRequest) -> Result<()>;
}

/// The chosen transition for one show/toggle invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPlan {
    pub destination: Option<Rect>,
    pub animation: AnimationDescriptor,
    pub with_thumbnail: bool,
}

/// Decide between a thumbnail transition and the generic one.
///
/// Queries the three most recent tasks, drops those in the home stack (by
/// identity, not position), and picks the destination rect for the
/// remaining count. A thumbnail transition requires the top task not to be
/// home, precomputed geometry, and a usable preview image; every missing
/// piece degrades toward the generic path rather than failing.
pub fn plan_transition<S: SystemServices>(
    services: &mut S,
    rects: &AnimationRectSet,
    top_task_is_home: bool,
) -> Result<TransitionPlan> {
    let recent = services.list_recent_tasks(3)?;
    let visible = filter_home_tasks(services, recent)?;
    let destination = rects.select(visible.len());

    let use_thumbnail = !top_task_is_home && rects.is_ready();
    if use_thumbnail {
        if let Some(plan) = thumbnail_plan(services, &visible, destination)? {
            return Ok(plan);
        }
        debug!("No usable preview image, falling back to generic transition");
    }

    Ok(TransitionPlan {
        destination,
        animation: AnimationDescriptor::Custom {
            enter: GENERIC_ENTER_ANIMATION,
            exit: GENERIC_EXIT_ANIMATION,
        },
        with_thumbnail: false,
    })
}

/// Drop tasks that belong to the home/launcher stack. The result may be
/// empty, which the rect selection treats as a single-task layout.
fn filter_home_tasks<S: SystemServices>(
    services: &mut S,
    tasks: Vec<TaskInfo>,
) -> Result<Vec<TaskInfo>> {
    let mut visible = Vec::with_capacity(tasks.len());
    for task in tasks {
        if !services.is_task_in_home_stack(task.id)? {
            visible.push(task);
        }
    }
    Ok(visible)
}

/// Try to seed a thumbnail transition: first the task thumbnail of the
/// front-most visible task, then a full-display capture cropped to below
/// the status bar. Returns None when neither yields a usable image.
fn thumbnail_plan<S: SystemServices>(
    services: &mut S,
    visible: &[TaskInfo],
    destination: Option<Rect>,
) -> Result<Option<TransitionPlan>> {
    if let Some(first) = visible.first()
        && let Some(thumbnail) = services.capture_task_thumbnail(first.id)?
        && thumbnail.is_usable()
    {
        return Ok(Some(TransitionPlan {
            destination,
            animation: AnimationDescriptor::ThumbnailScale {
                thumbnail,
                source_crop_top: 0,
            },
            with_thumbnail: true,
        }));
    }

    if let Some(screenshot) = services.capture_full_display()?
        && screenshot.is_usable()
    {
        let crop = services.status_bar_inset_height();
        return Ok(Some(TransitionPlan {
            destination,
            animation: AnimationDescriptor::ThumbnailScale {
                thumbnail: screenshot,
                source_crop_top: crop,
            },
            with_thumbnail: true,
        }));
    }

    Ok(None)
}
