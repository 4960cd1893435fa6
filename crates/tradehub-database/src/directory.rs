//! Role directory adapter backed by the user store.

use async_trait::async_trait;

use tradehub_core::result::AppResult;
use tradehub_core::traits::RoleDirectory;
use tradehub_core::types::{UserId, UserRole};

use crate::repositories::user::UserRepository;

/// [`RoleDirectory`] implementation that queries PostgreSQL.
///
/// The member set is re-read on every call. Role promotions and demotions
/// made through the admin endpoint are therefore visible to the next
/// broadcast without any cache invalidation or restart.
#[derive(Debug, Clone)]
pub struct PgRoleDirectory {
    users: UserRepository,
}

impl PgRoleDirectory {
    /// Create a directory over the given user repository.
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }
}

#[async_trait]
impl RoleDirectory for PgRoleDirectory {
    async fn members_with_role(&self, role: UserRole) -> AppResult<Vec<UserId>> {
        let members = self.users.find_by_role(role).await?;
        Ok(members.into_iter().map(|u| u.id).collect())
    }
}
