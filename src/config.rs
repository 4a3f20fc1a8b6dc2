use crate::accessors::ComponentName;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimum interval between two close-on-toggle actions. Repeated input
/// inside this window is eaten rather than producing a janky transition.
pub const MIN_TOGGLE_DELAY: Duration = Duration::from_millis(425);

/// Static configuration for the proxy: the identity of the remote recents
/// surface and service, and the toggle debounce interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// The activity component that renders the recents surface. Used both
    /// as the launch target and to recognize the surface as foreground-most.
    pub recents_activity: ComponentName,
    /// The service component that owns the message endpoint.
    pub recents_service: ComponentName,
    /// Action name carried by the cross-process launch request.
    pub toggle_action: String,
    pub min_toggle_delay: Duration,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        ProxyConfig {
            recents_activity: ComponentName::new("recents.shell", "recents.shell.RecentsActivity"),
            recents_service: ComponentName::new("recents.shell", "recents.shell.RecentsService"),
            toggle_action: "recents.shell.SHOW_RECENTS".to_string(),
            min_toggle_delay: MIN_TOGGLE_DELAY,
        }
    }
}
