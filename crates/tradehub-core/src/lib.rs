//! # tradehub-core
//!
//! Core crate for TradeHub. Contains configuration schemas, typed
//! identifiers, the user role type, cross-crate trait boundaries, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other TradeHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
