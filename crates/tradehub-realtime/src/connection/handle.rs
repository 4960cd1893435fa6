//! Individual connection handle.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use tradehub_core::types::UserId;

use crate::event::EventBody;

/// Unique connection identifier.
///
/// Distinguishes transport sessions of the same user, which is what makes
/// compare-and-remove unregistration possible: a stale session can only
/// evict its own registry entry, never a newer one.
pub type ConnectionId = Uuid;

/// Result of pushing an event onto a connection's outbound channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The event was queued for the client.
    Delivered,
    /// The outbound buffer was full; the event was dropped but the
    /// connection is still live.
    Dropped,
    /// The receiving side is gone; the peer is effectively offline.
    Disconnected,
}

/// A handle to a single live connection.
///
/// Holds the sender half of the session's outbound channel plus the identity
/// it was registered under. The registry and dispatcher only ever push
/// through the sender; the session that created the channel owns the
/// receiving half and its closure.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID.
    pub id: ConnectionId,
    /// User who owns this connection.
    pub user_id: UserId,
    /// When the connection was registered.
    pub connected_at: DateTime<Utc>,
    /// Sender for outbound events.
    sender: mpsc::Sender<EventBody>,
}

impl ConnectionHandle {
    /// Create a new connection handle.
    pub fn new(user_id: UserId, sender: mpsc::Sender<EventBody>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            connected_at: Utc::now(),
            sender,
        }
    }

    /// Push an event onto this connection without blocking.
    ///
    /// A full buffer drops the event rather than awaiting; a slow client can
    /// never stall the caller or delivery to sibling recipients.
    pub fn push(&self, body: EventBody) -> PushOutcome {
        match self.sender.try_send(body) {
            Ok(()) => PushOutcome::Delivered,
            Err(mpsc::error::TrySendError::Full(body)) => {
                tracing::warn!(
                    conn_id = %self.id,
                    user_id = %self.user_id,
                    event = body.kind(),
                    "Outbound buffer full, dropping event"
                );
                PushOutcome::Dropped
            }
            Err(mpsc::error::TrySendError::Closed(_)) => PushOutcome::Disconnected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradehub_entity::Notification;

    fn notification_body() -> EventBody {
        EventBody::NewNotification(Notification::new(UserId::new(), "test", "hello"))
    }

    #[tokio::test]
    async fn push_delivers_while_receiver_lives() {
        let (tx, mut rx) = mpsc::channel(4);
        let handle = ConnectionHandle::new(UserId::new(), tx);

        assert_eq!(handle.push(notification_body()), PushOutcome::Delivered);
        assert!(rx.recv().await.is_some());
    }

    #[tokio::test]
    async fn push_reports_disconnected_after_receiver_drops() {
        let (tx, rx) = mpsc::channel(4);
        let handle = ConnectionHandle::new(UserId::new(), tx);
        drop(rx);

        assert_eq!(handle.push(notification_body()), PushOutcome::Disconnected);
    }

    #[tokio::test]
    async fn push_drops_on_full_buffer_without_blocking() {
        let (tx, _rx) = mpsc::channel(1);
        let handle = ConnectionHandle::new(UserId::new(), tx);

        assert_eq!(handle.push(notification_body()), PushOutcome::Delivered);
        assert_eq!(handle.push(notification_body()), PushOutcome::Dropped);
    }
}
