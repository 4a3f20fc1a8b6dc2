use crate::accessors::{ServiceTransport, SystemServices};
use crate::channel::MessageChannel;
use crate::config::ProxyConfig;
use crate::connection::{ConnectionManager, ConnectionState};
use crate::geometry::{AnimationRectSet, Insets};
use crate::message::{InboundMessage, OutboundMessage};
use crate::transition::{self, ActivityLauncher, LaunchRequest, UiAnchor};
use anyhow::Result;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// The per-invocation decision tree behind show/hide/toggle requests.
///
/// All state lives here or in the owned [`ConnectionManager`]; the proxy
/// event loop is the single caller, so no method ever races another. No
/// method blocks: binding, message sends, and activity launches are all
/// fire-and-forget, with completions delivered back through
/// `on_connected` / `on_disconnected` / `on_message` /
/// `on_animation_started`.
pub struct ToggleController<S, L, T>
where
    S: SystemServices,
    L: ActivityLauncher,
    T: ServiceTransport,
{
    config: ProxyConfig,
    services: S,
    launcher: L,
    connection: ConnectionManager<T>,
    geometry: AnimationRectSet,
    /// Stamp of the last toggle-triggered foreground action or activity
    /// start. Gates only the toggle-to-close path.
    last_toggle: Option<Instant>,
    anchor: Option<UiAnchor>,
    from_alt_source: bool,
    boot_completed: bool,
}

impl<S, L, T> ToggleController<S, L, T>
where
    S: SystemServices,
    L: ActivityLauncher,
    T: ServiceTransport,
{
    pub fn new(config: ProxyConfig, services: S, launcher: L, transport: T) -> Self {
        ToggleController {
            config,
            services,
            launcher,
            connection: ConnectionManager::new(transport),
            geometry: AnimationRectSet::new(),
            last_toggle: None,
            anchor: None,
            from_alt_source: false,
            boot_completed: false,
        }
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    pub fn geometry(&self) -> &AnimationRectSet {
        &self.geometry
    }

    /// Eagerly establish the long-running service connection at host
    /// startup, without deferring any user action.
    pub fn on_start(&mut self) -> Result<()> {
        info!("Recents proxy starting");
        self.connection.request_connection(false)?;
        Ok(())
    }

    pub fn on_boot_completed(&mut self) {
        self.boot_completed = true;
    }

    /// Show the recents surface.
    pub fn show(&mut self, from_alt_source: bool, anchor: Option<UiAnchor>) -> Result<()> {
        debug!("show(from_alt_source={})", from_alt_source);
        self.anchor = anchor;
        self.from_alt_source = from_alt_source;
        if !self.connection.is_bound() {
            self.connection.request_connection(true)?;
            return Ok(());
        }
        self.start_recents_if_hidden()
    }

    /// Ask the remote surface to dismiss itself. A no-op while unbound or
    /// before boot completes; there is nothing to hide yet.
    pub fn hide(&mut self, from_alt_source: bool) {
        debug!("hide(from_alt_source={})", from_alt_source);
        if !self.boot_completed {
            return;
        }
        if let Some(channel) = self.connection.channel() {
            channel.send(OutboundMessage::HideRecents { from_alt_source });
        }
    }

    /// Toggle the recents surface.
    pub fn toggle(&mut self, anchor: Option<UiAnchor>) -> Result<()> {
        debug!("toggle(bound={})", self.connection.is_bound());
        self.anchor = anchor;
        self.from_alt_source = false;
        if !self.connection.is_bound() {
            self.connection.request_connection(true)?;
            return Ok(());
        }
        self.toggle_recents_activity()
    }

    /// Preload is accepted but deliberately does nothing at this layer.
    pub fn preload(&mut self) {}

    pub fn cancel_preload(&mut self) {}

    /// Device configuration changed; resync animation geometry.
    pub fn on_configuration_changed(&mut self) -> Result<()> {
        self.update_animation_rects()
    }

    /// Connect callback from the transport.
    ///
    /// If geometry is already valid, a deferred show/toggle replays now;
    /// otherwise a configuration request goes out first and the replay
    /// waits for its reply.
    pub fn on_connected(&mut self, channel: MessageChannel) -> Result<()> {
        self.connection.on_connected(channel);
        if self.geometry.is_ready() {
            if self.connection.take_replay() {
                return self.start_recents_if_hidden();
            }
            Ok(())
        } else {
            self.update_animation_rects()
        }
    }

    pub fn on_disconnected(&mut self) {
        self.connection.on_disconnected();
    }

    /// One inbound message, delivered in arrival order by the event loop.
    pub fn on_message(&mut self, message: InboundMessage) -> Result<()> {
        if !self.connection.is_bound() {
            // Late delivery after a disconnect
            debug!("Discarding {:?} while not bound", message);
            return Ok(());
        }
        match message {
            InboundMessage::UpdateConfiguration {
                single,
                two,
                multiple,
            } => {
                let status_bar_height = self.services.status_bar_inset_height();
                self.geometry.update(single, two, multiple, status_bar_height);
                if self.connection.take_replay() {
                    return self.start_recents_if_hidden();
                }
            }
            InboundMessage::UpdateTaskThumbnail { task_id, .. } => {
                // Consumed by the rendering side; nothing to decide here
                debug!("Thumbnail update for task {}", task_id);
            }
            InboundMessage::ShowRecents => {
                debug!("ShowRecents pass-through");
            }
        }
        Ok(())
    }

    /// The cross-process launch animation has begun; let the service start
    /// its enter animation.
    pub fn on_animation_started(&mut self) {
        if let Some(channel) = self.connection.channel() {
            channel.send(OutboundMessage::StartEnterAnimation);
        }
    }

    /// Toggle while bound: talk to an already-foregrounded surface
    /// directly, otherwise animate it in.
    fn toggle_recents_activity(&mut self) -> Result<()> {
        let (recents_foreground, top_task_is_home) = self.query_foreground()?;
        if recents_foreground {
            // Repeated toggles inside the debounce window are eaten; a
            // janky half-finished transition is worse than a missed input.
            if self.within_debounce_window() {
                debug!("Toggle inside debounce window, dropping");
                return Ok(());
            }
            if let Some(channel) = self.connection.channel() {
                channel.send(OutboundMessage::ToggleRecents);
            }
            self.last_toggle = Some(Instant::now());
            return Ok(());
        }
        self.start_recents_activity(top_task_is_home)
    }

    /// Start the recents surface unless it is already front-most.
    fn start_recents_if_hidden(&mut self) -> Result<()> {
        let (recents_foreground, top_task_is_home) = self.query_foreground()?;
        if recents_foreground {
            return Ok(());
        }
        self.start_recents_activity(top_task_is_home)
    }

    /// Plan the transition and issue the launch. A missing launch target
    /// degrades to a logged no-op; the debounce stamp is recorded either
    /// way.
    fn start_recents_activity(&mut self, top_task_is_home: bool) -> Result<()> {
        let plan = transition::plan_transition(&mut self.services, &self.geometry, top_task_is_home)?;
        let request = LaunchRequest {
            component: self.config.recents_activity.clone(),
            action: self.config.toggle_action.clone(),
            new_task: true,
            exclude_from_recents: true,
            animating_with_thumbnail: plan.with_thumbnail,
            from_alt_source: self.from_alt_source,
            destination: plan.destination,
            animation: plan.animation,
            anchor: self.anchor,
        };
        if let Err(e) = self.launcher.start_cross_process_activity(request) {
            warn!("Failed to launch recents surface: {:#}", e);
        }
        self.last_toggle = Some(Instant::now());
        Ok(())
    }

    /// Whether the recents surface is the front-most task, and as a side
    /// channel whether the top task sits in the home stack.
    fn query_foreground(&mut self) -> Result<(bool, bool)> {
        let running = self.services.list_running_tasks(1)?;
        let Some(top) = running.first() else {
            return Ok((false, false));
        };
        if top.top_component == self.config.recents_activity {
            return Ok((true, false));
        }
        let top_task_is_home = self.services.is_task_in_home_stack(top.id)?;
        Ok((false, top_task_is_home))
    }

    fn within_debounce_window(&self) -> bool {
        self.last_toggle
            .is_some_and(|t| t.elapsed() < self.config.min_toggle_delay)
    }

    /// Send the current window bounds and system insets to the service so
    /// it can recompute the animation rects.
    fn update_animation_rects(&mut self) -> Result<()> {
        if let Some(channel) = self.connection.channel() {
            let window = self.services.current_display_bounds()?;
            let system_insets = Insets {
                left: 0,
                top: self.services.status_bar_inset_height(),
                right: 0,
                bottom: self.services.navigation_bar_inset_height(),
            };
            channel.send(OutboundMessage::UpdateConfiguration {
                window,
                system_insets,
            });
        }
        Ok(())
    }
}
