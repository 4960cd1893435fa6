//! User repository implementation.

use sqlx::PgPool;

use tradehub_core::error::{AppError, ErrorKind};
use tradehub_core::result::AppResult;
use tradehub_core::types::UserRole;
use tradehub_entity::user::User;

/// Repository for user identity and role queries.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all users currently holding a role.
    ///
    /// This is the query behind role-targeted broadcasts; it runs fresh on
    /// every emit so promotions are visible immediately.
    pub async fn find_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE role = $1 ORDER BY created_at")
            .bind(role)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list users by role", e)
            })
    }

}
