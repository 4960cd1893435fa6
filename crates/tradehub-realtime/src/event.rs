//! Domain event contract between producers and the dispatcher.
//!
//! Producers (the message, notification, and report endpoints) persist their
//! record first, then build one of these events from the persisted row and
//! hand it to [`EventDispatcher::emit`](crate::dispatcher::EventDispatcher::emit).
//! Events are ephemeral: consumed once, never stored.

use serde::{Deserialize, Serialize};

use tradehub_core::types::{ReportId, UserId, UserRole};
use tradehub_entity::{Message, Notification, Report};

/// The closed set of event kinds the core can deliver.
///
/// Serializes to the wire frames clients consume: the variant name becomes
/// the `event` tag (`new_message`, `new_notification`, `new_report`,
/// `report_closed`) and the payload lands under `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum EventBody {
    /// A chat message was persisted for a recipient.
    NewMessage(Message),
    /// A notification was persisted for a user.
    NewNotification(Notification),
    /// A moderation report was filed.
    NewReport(Report),
    /// A moderation report was closed.
    ReportClosed {
        /// The report that was closed.
        report_id: ReportId,
    },
}

impl EventBody {
    /// Wire name of this event kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NewMessage(_) => "new_message",
            Self::NewNotification(_) => "new_notification",
            Self::NewReport(_) => "new_report",
            Self::ReportClosed { .. } => "report_closed",
        }
    }
}

/// Who an event is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryTarget {
    /// Exactly one user (unicast).
    User(UserId),
    /// Every user currently holding a role (broadcast-to-role).
    Role(UserRole),
}

/// A fact to be delivered to currently-connected recipients.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainEvent {
    /// Who receives the event.
    pub target: DeliveryTarget,
    /// The already-persisted payload, tagged with its kind.
    pub body: EventBody,
}

impl DomainEvent {
    /// A persisted chat message, addressed to its recipient.
    pub fn message_sent(message: Message) -> Self {
        Self {
            target: DeliveryTarget::User(message.recipient_id),
            body: EventBody::NewMessage(message),
        }
    }

    /// A persisted notification, addressed to its user.
    pub fn notification_created(notification: Notification) -> Self {
        Self {
            target: DeliveryTarget::User(notification.user_id),
            body: EventBody::NewNotification(notification),
        }
    }

    /// A freshly-filed report, broadcast to all administrators.
    pub fn report_opened(report: Report) -> Self {
        Self {
            target: DeliveryTarget::Role(UserRole::Admin),
            body: EventBody::NewReport(report),
        }
    }

    /// A closed report, broadcast to all administrators.
    pub fn report_closed(report_id: ReportId) -> Self {
        Self {
            target: DeliveryTarget::Role(UserRole::Admin),
            body: EventBody::ReportClosed { report_id },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_events_target_the_recipient() {
        let msg = Message::new(UserId::new(), UserId::new(), Default::default(), "hi");
        let recipient = msg.recipient_id;
        let event = DomainEvent::message_sent(msg);
        assert_eq!(event.target, DeliveryTarget::User(recipient));
        assert_eq!(event.body.kind(), "new_message");
    }

    #[test]
    fn report_events_target_administrators() {
        let report = Report::against_user(UserId::new(), UserId::new(), "spam");
        let event = DomainEvent::report_opened(report);
        assert_eq!(event.target, DeliveryTarget::Role(UserRole::Admin));

        let event = DomainEvent::report_closed(ReportId::new());
        assert_eq!(event.target, DeliveryTarget::Role(UserRole::Admin));
        assert_eq!(event.body.kind(), "report_closed");
    }

    #[test]
    fn wire_format_carries_event_tag_and_data() {
        let notification = Notification::new(UserId::new(), "favorite", "Someone saved your ad");
        let event = DomainEvent::notification_created(notification.clone());

        let json = serde_json::to_value(&event.body).unwrap();
        assert_eq!(json["event"], "new_notification");
        assert_eq!(json["data"]["message"], "Someone saved your ad");
        assert_eq!(json["data"]["id"], notification.id.to_string());
    }

    #[test]
    fn report_closed_frame_carries_only_the_id() {
        let id = ReportId::new();
        let json = serde_json::to_value(&EventBody::ReportClosed { report_id: id }).unwrap();
        assert_eq!(json["event"], "report_closed");
        assert_eq!(json["data"]["report_id"], id.to_string());
    }
}
