//! In-memory role directory.

use async_trait::async_trait;
use dashmap::DashMap;

use tradehub_core::result::AppResult;
use tradehub_core::traits::RoleDirectory;
use tradehub_core::types::{UserId, UserRole};

/// [`RoleDirectory`] backed by an in-process map.
///
/// Used by tests and single-node setups that have no user store wired in;
/// production uses the database-backed directory. Grants are visible to the
/// next `members_with_role` call immediately, matching the no-cache policy
/// of the real directory.
#[derive(Debug, Default)]
pub struct StaticRoleDirectory {
    members: DashMap<UserRole, Vec<UserId>>,
}

impl StaticRoleDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            members: DashMap::new(),
        }
    }

    /// Grant `role` to `user_id`.
    pub fn grant(&self, role: UserRole, user_id: UserId) {
        let mut members = self.members.entry(role).or_default();
        if !members.contains(&user_id) {
            members.push(user_id);
        }
    }

    /// Revoke `role` from `user_id`.
    pub fn revoke(&self, role: UserRole, user_id: UserId) {
        if let Some(mut members) = self.members.get_mut(&role) {
            members.retain(|id| *id != user_id);
        }
    }
}

#[async_trait]
impl RoleDirectory for StaticRoleDirectory {
    async fn members_with_role(&self, role: UserRole) -> AppResult<Vec<UserId>> {
        Ok(self
            .members
            .get(&role)
            .map(|members| members.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn grants_and_revocations_are_visible_immediately() {
        let directory = StaticRoleDirectory::new();
        let user = UserId::new();

        directory.grant(UserRole::Admin, user);
        assert_eq!(
            directory.members_with_role(UserRole::Admin).await.unwrap(),
            vec![user]
        );

        directory.revoke(UserRole::Admin, user);
        assert!(
            directory
                .members_with_role(UserRole::Admin)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn duplicate_grants_collapse() {
        let directory = StaticRoleDirectory::new();
        let user = UserId::new();

        directory.grant(UserRole::Admin, user);
        directory.grant(UserRole::Admin, user);
        assert_eq!(
            directory
                .members_with_role(UserRole::Admin)
                .await
                .unwrap()
                .len(),
            1
        );
    }
}
