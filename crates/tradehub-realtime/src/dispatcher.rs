//! Event dispatcher — routes domain events to live connections.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use tradehub_core::traits::RoleDirectory;
use tradehub_core::types::UserId;

use crate::connection::handle::PushOutcome;
use crate::event::{DeliveryTarget, DomainEvent, EventBody};
use crate::registry::PresenceRegistry;

/// Delivers domain events to the connections of their target users.
///
/// Delivery is fire-and-forget: the payload was durably persisted by the
/// producer before `emit` was called, so `emit` never reports an outcome.
/// Producers must not treat non-delivery as an application error.
pub struct EventDispatcher {
    /// Who is connected right now.
    registry: Arc<PresenceRegistry>,
    /// Who holds which role right now.
    roles: Arc<dyn RoleDirectory>,
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher").finish()
    }
}

impl EventDispatcher {
    /// Create a dispatcher over the given registry and role directory.
    pub fn new(registry: Arc<PresenceRegistry>, roles: Arc<dyn RoleDirectory>) -> Self {
        Self { registry, roles }
    }

    /// Deliver an event to its target(s).
    ///
    /// Unicast targets get a single lookup-and-push; absent recipients are a
    /// silent no-op. Role targets are resolved through the role directory,
    /// then each member is delivered to independently: pushes never block,
    /// and one member's dead or lagging channel has no effect on siblings.
    pub async fn emit(&self, event: DomainEvent) {
        match event.target {
            DeliveryTarget::User(user_id) => {
                self.deliver(user_id, event.body);
            }
            DeliveryTarget::Role(role) => {
                let members = match self.roles.members_with_role(role).await {
                    Ok(members) => members,
                    Err(e) => {
                        // The record is already persisted; a failed role
                        // query only costs the real-time push.
                        warn!(
                            role = %role,
                            error = %e,
                            "Role lookup failed, dropping broadcast"
                        );
                        return;
                    }
                };

                trace!(
                    role = %role,
                    members = members.len(),
                    event = event.body.kind(),
                    "Broadcasting to role"
                );

                for user_id in members {
                    self.deliver(user_id, event.body.clone());
                }
            }
        }
    }

    /// Push one event to one user, if they are connected.
    fn deliver(&self, user_id: UserId, body: EventBody) {
        let Some(handle) = self.registry.lookup(user_id) else {
            trace!(user_id = %user_id, event = body.kind(), "Recipient offline, dropping event");
            return;
        };

        let kind = body.kind();
        match handle.push(body) {
            PushOutcome::Delivered => {
                trace!(user_id = %user_id, conn_id = %handle.id, event = kind, "Event delivered");
            }
            PushOutcome::Dropped => {
                // Already logged by the handle; connection stays registered.
            }
            PushOutcome::Disconnected => {
                // The peer vanished without a clean unregister. Retire the
                // stale entry; compare-and-remove keeps this safe against a
                // concurrent re-registration.
                self.registry.unregister(user_id, handle.id);
                debug!(
                    user_id = %user_id,
                    conn_id = %handle.id,
                    event = kind,
                    "Dead channel, unregistered stale connection"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::sync::mpsc;

    use tradehub_core::types::{ReportId, UserRole};
    use tradehub_entity::{Message, Notification, Report};

    use crate::connection::handle::ConnectionHandle;
    use crate::directory::StaticRoleDirectory;
    use crate::event::EventBody;

    fn dispatcher_with(
        roles: StaticRoleDirectory,
    ) -> (Arc<PresenceRegistry>, EventDispatcher) {
        let registry = Arc::new(PresenceRegistry::new());
        let dispatcher = EventDispatcher::new(registry.clone(), Arc::new(roles));
        (registry, dispatcher)
    }

    fn connect(registry: &PresenceRegistry, user: UserId) -> mpsc::Receiver<EventBody> {
        let (tx, rx) = mpsc::channel(8);
        registry.register(Arc::new(ConnectionHandle::new(user, tx)));
        rx
    }

    #[tokio::test]
    async fn unicast_delivers_the_payload_unchanged() {
        let (registry, dispatcher) = dispatcher_with(StaticRoleDirectory::new());
        let recipient = UserId::new();
        let mut rx = connect(&registry, recipient);

        let message = Message::new(UserId::new(), recipient, Default::default(), "still for sale?");
        dispatcher.emit(DomainEvent::message_sent(message.clone())).await;

        match rx.try_recv().unwrap() {
            EventBody::NewMessage(delivered) => assert_eq!(delivered, message),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(rx.try_recv().is_err(), "exactly one push expected");
    }

    #[tokio::test]
    async fn unicast_to_offline_user_is_a_silent_no_op() {
        let (_registry, dispatcher) = dispatcher_with(StaticRoleDirectory::new());

        let notification = Notification::new(UserId::new(), "favorite", "saved");
        dispatcher
            .emit(DomainEvent::notification_created(notification))
            .await;
        // Nothing to assert beyond "did not panic": no queue, no error.
    }

    #[tokio::test]
    async fn broadcast_reaches_every_connected_admin() {
        let admin1 = UserId::new();
        let admin2 = UserId::new();
        let roles = StaticRoleDirectory::new();
        roles.grant(UserRole::Admin, admin1);
        roles.grant(UserRole::Admin, admin2);

        let (registry, dispatcher) = dispatcher_with(roles);
        let mut rx1 = connect(&registry, admin1);
        let mut rx2 = connect(&registry, admin2);

        let report = Report::against_user(UserId::new(), UserId::new(), "scam listing");
        dispatcher.emit(DomainEvent::report_opened(report.clone())).await;

        for rx in [&mut rx1, &mut rx2] {
            match rx.try_recv().unwrap() {
                EventBody::NewReport(delivered) => assert_eq!(delivered, report),
                other => panic!("unexpected event: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn one_dead_admin_channel_does_not_stop_siblings() {
        let dead_admin = UserId::new();
        let live_admin = UserId::new();
        let roles = StaticRoleDirectory::new();
        roles.grant(UserRole::Admin, dead_admin);
        roles.grant(UserRole::Admin, live_admin);

        let (registry, dispatcher) = dispatcher_with(roles);

        // dead_admin's receiver is dropped immediately: pushes will fail.
        let rx_dead = connect(&registry, dead_admin);
        drop(rx_dead);
        let mut rx_live = connect(&registry, live_admin);

        dispatcher
            .emit(DomainEvent::report_closed(ReportId::new()))
            .await;

        assert!(matches!(
            rx_live.try_recv().unwrap(),
            EventBody::ReportClosed { .. }
        ));
    }

    #[tokio::test]
    async fn dead_channel_triggers_compensating_unregister() {
        let (registry, dispatcher) = dispatcher_with(StaticRoleDirectory::new());
        let user = UserId::new();

        let rx = connect(&registry, user);
        drop(rx);
        assert!(registry.is_online(user), "stale entry still present");

        let notification = Notification::new(user, "price_drop", "now cheaper");
        dispatcher
            .emit(DomainEvent::notification_created(notification))
            .await;

        assert!(!registry.is_online(user), "stale entry should be retired");
    }

    #[tokio::test]
    async fn broadcast_skips_offline_members_silently() {
        let online = UserId::new();
        let offline = UserId::new();
        let roles = StaticRoleDirectory::new();
        roles.grant(UserRole::Admin, online);
        roles.grant(UserRole::Admin, offline);

        let (registry, dispatcher) = dispatcher_with(roles);
        let mut rx = connect(&registry, online);

        let report = Report::against_listing(UserId::new(), Default::default(), "counterfeit");
        dispatcher.emit(DomainEvent::report_opened(report)).await;

        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn role_members_outside_the_role_never_hear_broadcasts() {
        let admin = UserId::new();
        let member = UserId::new();
        let roles = StaticRoleDirectory::new();
        roles.grant(UserRole::Admin, admin);
        roles.grant(UserRole::Member, member);

        let (registry, dispatcher) = dispatcher_with(roles);
        let _admin_rx = connect(&registry, admin);
        let mut member_rx = connect(&registry, member);

        dispatcher
            .emit(DomainEvent::report_closed(ReportId::new()))
            .await;

        assert!(member_rx.try_recv().is_err());
    }
}
