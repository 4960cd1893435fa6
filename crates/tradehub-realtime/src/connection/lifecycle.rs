//! Connection lifecycle state machine.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use tradehub_core::types::UserId;

use crate::connection::handle::ConnectionHandle;
use crate::event::EventBody;
use crate::registry::PresenceRegistry;

/// Where a transport session currently stands.
#[derive(Debug)]
enum SessionState {
    /// Transport accepted, identity not yet announced.
    Connecting,
    /// Identity known; this session's handle is (or was) in the registry.
    Registered(Arc<ConnectionHandle>),
    /// Terminal. A reconnecting client gets a brand-new lifecycle.
    Disconnected,
}

/// Drives one transport session through
/// `Connecting → Registered → Disconnected` and keeps the registry
/// consistent with reality.
///
/// The lifecycle owns the session's sender half until the identity
/// announcement arrives, then wraps it in a [`ConnectionHandle`] and
/// registers it. On disconnect it unregisters with compare-and-remove
/// semantics so it can never evict a newer registration for the same user.
#[derive(Debug)]
pub struct ConnectionLifecycle {
    registry: Arc<PresenceRegistry>,
    sender: mpsc::Sender<EventBody>,
    state: SessionState,
}

impl ConnectionLifecycle {
    /// Begin a session in the `Connecting` state.
    pub fn new(registry: Arc<PresenceRegistry>, sender: mpsc::Sender<EventBody>) -> Self {
        Self {
            registry,
            sender,
            state: SessionState::Connecting,
        }
    }

    /// The client announced its identity: transition to `Registered`.
    ///
    /// Registers a handle for this session's channel. A repeat announcement
    /// on the same session supersedes this session's own entry; an
    /// announcement after disconnect is ignored (no re-entry from the
    /// terminal state).
    pub fn announce(&mut self, user_id: UserId) -> Option<Arc<ConnectionHandle>> {
        if matches!(self.state, SessionState::Disconnected) {
            debug!(user_id = %user_id, "Ignoring register frame on closed session");
            return None;
        }

        let handle = Arc::new(ConnectionHandle::new(user_id, self.sender.clone()));

        if let Some(superseded) = self.registry.register(handle.clone()) {
            // The old channel stays open; its own session will observe the
            // transport close and take the stale-unregister path.
            debug!(
                user_id = %user_id,
                old_conn_id = %superseded.id,
                new_conn_id = %handle.id,
                "Connection superseded by a newer registration"
            );
        }

        info!(
            conn_id = %handle.id,
            user_id = %user_id,
            "Connection registered"
        );

        self.state = SessionState::Registered(handle.clone());
        Some(handle)
    }

    /// The transport closed or errored: transition to `Disconnected`.
    ///
    /// If this session never announced an identity there is nothing to clean
    /// up. Otherwise remove the registry entry only if it is still ours.
    /// Idempotent.
    pub fn finish(&mut self) {
        match std::mem::replace(&mut self.state, SessionState::Disconnected) {
            SessionState::Connecting => {
                debug!("Connection closed before identity announcement");
            }
            SessionState::Registered(handle) => {
                let removed = self.registry.unregister(handle.user_id, handle.id);
                if removed {
                    info!(
                        conn_id = %handle.id,
                        user_id = %handle.user_id,
                        "Connection unregistered"
                    );
                } else {
                    debug!(
                        conn_id = %handle.id,
                        user_id = %handle.user_id,
                        "Connection already superseded, registry untouched"
                    );
                }
            }
            SessionState::Disconnected => {}
        }
    }

    /// The user this session is registered as, if any.
    pub fn user_id(&self) -> Option<UserId> {
        match &self.state {
            SessionState::Registered(handle) => Some(handle.user_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(registry: &Arc<PresenceRegistry>) -> (ConnectionLifecycle, mpsc::Receiver<EventBody>) {
        let (tx, rx) = mpsc::channel(8);
        (ConnectionLifecycle::new(registry.clone(), tx), rx)
    }

    #[tokio::test]
    async fn announce_registers_and_finish_unregisters() {
        let registry = Arc::new(PresenceRegistry::new());
        let user = UserId::new();
        let (mut lifecycle, _rx) = session(&registry);

        lifecycle.announce(user).unwrap();
        assert!(registry.is_online(user));
        assert_eq!(lifecycle.user_id(), Some(user));

        lifecycle.finish();
        assert!(!registry.is_online(user));
        assert_eq!(lifecycle.user_id(), None);
    }

    #[tokio::test]
    async fn close_before_announce_touches_nothing() {
        let registry = Arc::new(PresenceRegistry::new());
        let (mut lifecycle, _rx) = session(&registry);

        lifecycle.finish();
        assert_eq!(registry.online_count(), 0);
    }

    #[tokio::test]
    async fn late_disconnect_of_superseded_session_keeps_newer_entry() {
        let registry = Arc::new(PresenceRegistry::new());
        let user = UserId::new();

        let (mut old_session, _old_rx) = session(&registry);
        old_session.announce(user).unwrap();

        let (mut new_session, _new_rx) = session(&registry);
        let new_handle = new_session.announce(user).unwrap();

        // The old tab's socket finally times out.
        old_session.finish();

        assert_eq!(registry.lookup(user).unwrap().id, new_handle.id);
    }

    #[tokio::test]
    async fn no_reentry_after_disconnect() {
        let registry = Arc::new(PresenceRegistry::new());
        let user = UserId::new();
        let (mut lifecycle, _rx) = session(&registry);

        lifecycle.finish();
        assert!(lifecycle.announce(user).is_none());
        assert!(!registry.is_online(user));
    }

    #[tokio::test]
    async fn finish_is_idempotent() {
        let registry = Arc::new(PresenceRegistry::new());
        let user = UserId::new();
        let (mut lifecycle, _rx) = session(&registry);

        lifecycle.announce(user).unwrap();
        lifecycle.finish();
        lifecycle.finish();
        assert_eq!(registry.online_count(), 0);
    }
}
