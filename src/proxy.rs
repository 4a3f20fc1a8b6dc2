use crate::accessors::{ServiceTransport, SystemServices};
use crate::channel::MessageChannel;
use crate::config::ProxyConfig;
use crate::controller::ToggleController;
use crate::message::InboundMessage;
use crate::transition::{ActivityLauncher, UiAnchor};
use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// A user-triggered request entering the proxy.
#[derive(Debug, Clone)]
pub enum ProxyRequest {
    Show {
        from_alt_source: bool,
        anchor: Option<UiAnchor>,
    },
    Hide {
        from_alt_source: bool,
    },
    Toggle {
        anchor: Option<UiAnchor>,
    },
    Preload,
    CancelPreload,
    ConfigurationChanged,
    BootCompleted,
}

/// An asynchronous completion delivered by the host adapters.
#[derive(Debug)]
pub enum ServiceEvent {
    Connected(MessageChannel),
    Disconnected,
    Message(InboundMessage),
    AnimationStarted,
}

/// Cloneable entry point for the UI-owning caller. Requests are
/// fire-and-forget; the caller is never blocked on the service connection.
#[derive(Debug, Clone)]
pub struct ProxyHandle {
    tx: mpsc::UnboundedSender<ProxyRequest>,
}

impl ProxyHandle {
    pub fn show(&self, from_alt_source: bool, anchor: Option<UiAnchor>) {
        self.send(ProxyRequest::Show {
            from_alt_source,
            anchor,
        });
    }

    pub fn hide(&self, from_alt_source: bool) {
        self.send(ProxyRequest::Hide { from_alt_source });
    }

    pub fn toggle(&self, anchor: Option<UiAnchor>) {
        self.send(ProxyRequest::Toggle { anchor });
    }

    pub fn preload(&self) {
        self.send(ProxyRequest::Preload);
    }

    pub fn cancel_preload(&self) {
        self.send(ProxyRequest::CancelPreload);
    }

    pub fn configuration_changed(&self) {
        self.send(ProxyRequest::ConfigurationChanged);
    }

    pub fn boot_completed(&self) {
        self.send(ProxyRequest::BootCompleted);
    }

    fn send(&self, request: ProxyRequest) {
        if self.tx.send(request).is_err() {
            warn!("Recents proxy is gone, dropping request");
        }
    }
}

/// Cloneable event injector handed to the transport and launcher adapters.
/// Events are processed strictly in arrival order by the proxy loop.
#[derive(Debug, Clone)]
pub struct ServiceEventSender {
    tx: mpsc::UnboundedSender<ServiceEvent>,
}

impl ServiceEventSender {
    pub fn connected(&self, channel: MessageChannel) {
        self.send(ServiceEvent::Connected(channel));
    }

    pub fn disconnected(&self) {
        self.send(ServiceEvent::Disconnected);
    }

    pub fn message(&self, message: InboundMessage) {
        self.send(ServiceEvent::Message(message));
    }

    pub fn animation_started(&self) {
        self.send(ServiceEvent::AnimationStarted);
    }

    fn send(&self, event: ServiceEvent) {
        if self.tx.send(event).is_err() {
            debug!("Recents proxy is gone, dropping service event");
        }
    }
}

/// Owns the controller and serializes every state transition onto one
/// task: user requests and service events are funneled through two
/// channels into a single select loop, so a connect callback can never
/// race a user-triggered toggle.
pub struct RecentsProxy<S, L, T>
where
    S: SystemServices,
    L: ActivityLauncher,
    T: ServiceTransport,
{
    controller: ToggleController<S, L, T>,
    request_rx: mpsc::UnboundedReceiver<ProxyRequest>,
    event_rx: mpsc::UnboundedReceiver<ServiceEvent>,
}

impl<S, L, T> RecentsProxy<S, L, T>
where
    S: SystemServices,
    L: ActivityLauncher,
    T: ServiceTransport,
{
    pub fn new(
        config: ProxyConfig,
        services: S,
        launcher: L,
        transport: T,
    ) -> (Self, ProxyHandle, ServiceEventSender) {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let proxy = RecentsProxy {
            controller: ToggleController::new(config, services, launcher, transport),
            request_rx,
            event_rx,
        };
        (
            proxy,
            ProxyHandle { tx: request_tx },
            ServiceEventSender { tx: event_tx },
        )
    }

    /// Main event loop. Binds eagerly, then runs until every handle and
    /// event sender is dropped. Handler failures are logged, never fatal:
    /// a missed animation beats a dead proxy.
    pub async fn run(mut self) -> Result<()> {
        info!("Starting recents proxy event loop");

        if let Err(e) = self.controller.on_start() {
            error!("Initial service bind failed: {:#}", e);
        }

        loop {
            tokio::select! {
                Some(request) = self.request_rx.recv() => {
                    if let Err(e) = self.handle_request(request) {
                        error!("Request failed: {:#}", e);
                    }
                }
                Some(event) = self.event_rx.recv() => {
                    if let Err(e) = self.handle_event(event) {
                        error!("Service event failed: {:#}", e);
                    }
                }
                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        Ok(())
    }

    fn handle_request(&mut self, request: ProxyRequest) -> Result<()> {
        debug!("Request: {:?}", request);
        match request {
            ProxyRequest::Show {
                from_alt_source,
                anchor,
            } => self.controller.show(from_alt_source, anchor),
            ProxyRequest::Hide { from_alt_source } => {
                self.controller.hide(from_alt_source);
                Ok(())
            }
            ProxyRequest::Toggle { anchor } => self.controller.toggle(anchor),
            ProxyRequest::Preload => {
                self.controller.preload();
                Ok(())
            }
            ProxyRequest::CancelPreload => {
                self.controller.cancel_preload();
                Ok(())
            }
            ProxyRequest::ConfigurationChanged => self.controller.on_configuration_changed(),
            ProxyRequest::BootCompleted => {
                self.controller.on_boot_completed();
                Ok(())
            }
        }
    }

    fn handle_event(&mut self, event: ServiceEvent) -> Result<()> {
        debug!("Service event: {:?}", event);
        match event {
            ServiceEvent::Connected(channel) => self.controller.on_connected(channel),
            ServiceEvent::Disconnected => {
                self.controller.on_disconnected();
                Ok(())
            }
            ServiceEvent::Message(message) => self.controller.on_message(message),
            ServiceEvent::AnimationStarted => {
                self.controller.on_animation_started();
                Ok(())
            }
        }
    }
}
