//! Cross-crate trait boundaries.

pub mod role_directory;

pub use role_directory::RoleDirectory;
