//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use tradehub_core::types::{NotificationId, UserId};

/// A notification to be delivered to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The recipient user.
    pub user_id: UserId,
    /// Notification category (e.g. `"favorite"`, `"price_drop"`).
    pub category: String,
    /// Notification body text.
    pub message: String,
    /// Optional link to the subject of the notification.
    pub link: Option<String>,
    /// Whether the user has read this notification.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Build a freshly-persisted notification record.
    pub fn new(user_id: UserId, category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            user_id,
            category: category.into(),
            message: message.into(),
            link: None,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// Check if the notification has been read.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}
