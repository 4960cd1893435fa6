//! # tradehub-entity
//!
//! Persisted record shapes for TradeHub. These structs mirror the rows the
//! marketplace's CRUD layer writes before handing an event to the real-time
//! dispatcher; the dispatcher treats them as opaque, already-serializable
//! payloads.

pub mod message;
pub mod notification;
pub mod report;
pub mod user;

pub use message::Message;
pub use notification::Notification;
pub use report::{Report, ReportStatus};
pub use user::User;
