//! Top-level real-time engine that ties the subsystems together.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use tradehub_core::config::realtime::RealtimeConfig;
use tradehub_core::traits::RoleDirectory;

use crate::connection::lifecycle::ConnectionLifecycle;
use crate::dispatcher::EventDispatcher;
use crate::event::EventBody;
use crate::registry::PresenceRegistry;

/// Central real-time engine: one registry, one dispatcher.
///
/// Constructed once at startup and handed to the transport layer and the
/// producing endpoints by `Arc`; nothing here is process-global.
#[derive(Clone)]
pub struct RealtimeEngine {
    registry: Arc<PresenceRegistry>,
    dispatcher: Arc<EventDispatcher>,
    config: RealtimeConfig,
}

impl std::fmt::Debug for RealtimeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeEngine").finish()
    }
}

impl RealtimeEngine {
    /// Create a new engine over the given role directory.
    pub fn new(config: RealtimeConfig, roles: Arc<dyn RoleDirectory>) -> Self {
        let registry = Arc::new(PresenceRegistry::new());
        let dispatcher = Arc::new(EventDispatcher::new(registry.clone(), roles));

        info!("Real-time engine initialized");

        Self {
            registry,
            dispatcher,
            config,
        }
    }

    /// Begin a new transport session.
    ///
    /// Returns the lifecycle the transport drives plus the receiving half of
    /// the session's outbound channel. The transport owns the receiver; the
    /// registry and dispatcher only ever see the sender, wrapped in a
    /// connection handle once the client announces its identity.
    pub fn open_session(&self) -> (ConnectionLifecycle, mpsc::Receiver<EventBody>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size);
        (ConnectionLifecycle::new(self.registry.clone(), tx), rx)
    }

    /// The presence registry.
    pub fn registry(&self) -> &Arc<PresenceRegistry> {
        &self.registry
    }

    /// The event dispatcher producers emit through.
    pub fn dispatcher(&self) -> &Arc<EventDispatcher> {
        &self.dispatcher
    }

    /// Drop all presence state during shutdown.
    ///
    /// Sessions notice their channels closing as their tasks wind down; no
    /// further delivery is attempted.
    pub fn shutdown(&self) {
        let online = self.registry.online_count();
        self.registry.clear();
        info!(connections = online, "Real-time engine shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tradehub_core::types::UserId;
    use tradehub_entity::Message;

    use crate::directory::StaticRoleDirectory;
    use crate::event::DomainEvent;

    fn engine() -> RealtimeEngine {
        RealtimeEngine::new(
            RealtimeConfig::default(),
            Arc::new(StaticRoleDirectory::new()),
        )
    }

    #[tokio::test]
    async fn session_round_trip_through_the_engine() {
        let engine = engine();
        let recipient = UserId::new();

        let (mut lifecycle, mut rx) = engine.open_session();
        lifecycle.announce(recipient).unwrap();

        let message = Message::new(UserId::new(), recipient, Default::default(), "hello");
        engine
            .dispatcher()
            .emit(DomainEvent::message_sent(message))
            .await;

        assert!(rx.try_recv().is_ok());

        lifecycle.finish();
        assert_eq!(engine.registry().online_count(), 0);
    }

    #[tokio::test]
    async fn shutdown_clears_presence() {
        let engine = engine();
        let (mut lifecycle, _rx) = engine.open_session();
        lifecycle.announce(UserId::new()).unwrap();

        engine.shutdown();
        assert_eq!(engine.registry().online_count(), 0);
    }
}
