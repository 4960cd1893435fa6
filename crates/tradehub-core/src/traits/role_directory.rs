//! Role membership boundary consumed by the event dispatcher.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{UserId, UserRole};

/// Answers "which users currently hold role X".
///
/// Backed by the user store in production. Implementations must reflect role
/// changes made through the admin-promotion endpoint without a restart, so
/// the canonical implementation queries on every call rather than caching
/// the member set.
///
/// Role membership is identity data, not connectivity data: the presence
/// registry never knows about roles, and this trait never knows who is
/// connected.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Return the identifiers of every user currently holding `role`.
    async fn members_with_role(&self, role: UserRole) -> AppResult<Vec<UserId>>;
}
