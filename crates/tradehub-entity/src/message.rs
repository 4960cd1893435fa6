//! Chat message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use tradehub_core::types::{ListingId, MessageId, UserId};

/// A chat message between two users about a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Unique message identifier.
    pub id: MessageId,
    /// The user who sent the message.
    pub sender_id: UserId,
    /// The user the message is addressed to.
    pub recipient_id: UserId,
    /// The listing the conversation is about.
    pub listing_id: ListingId,
    /// Message text.
    pub content: String,
    /// Whether the recipient has read the message.
    pub is_read: bool,
    /// When the message was sent.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Build a freshly-persisted message record.
    pub fn new(
        sender_id: UserId,
        recipient_id: UserId,
        listing_id: ListingId,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: MessageId::new(),
            sender_id,
            recipient_id,
            listing_id,
            content: content.into(),
            is_read: false,
            created_at: Utc::now(),
        }
    }
}
