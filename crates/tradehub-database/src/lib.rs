//! # tradehub-database
//!
//! PostgreSQL connection management, migrations, the user-store repository,
//! and the role directory adapter that backs role-targeted event broadcasts.

pub mod connection;
pub mod directory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use directory::PgRoleDirectory;
