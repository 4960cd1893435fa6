//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use tradehub_core::types::{UserId, UserRole};

/// A marketplace account as stored in the user table.
///
/// Credentials live with the (external) authentication service; this service
/// only reads identity and role attributes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Profile picture URL.
    pub profile_pic: Option<String>,
    /// Free-form profile text.
    pub bio: Option<String>,
    /// Marketplace role.
    pub role: UserRole,
    /// Whether the account passed identity verification.
    pub verified: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check whether this account can see the moderation queue.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
