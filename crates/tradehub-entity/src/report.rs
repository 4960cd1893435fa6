//! Moderation report entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use tradehub_core::types::{ListingId, ReportId, UserId};

/// Lifecycle state of a moderation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "report_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Awaiting moderator action.
    Open,
    /// Resolved by a moderator.
    Closed,
}

/// A user-filed report against another user or a listing.
///
/// At least one of `reported_user` / `reported_listing` is set; the CRUD
/// layer validates that before persisting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Report {
    /// Unique report identifier.
    pub id: ReportId,
    /// The user who filed the report.
    pub reporter: UserId,
    /// The reported user, if any.
    pub reported_user: Option<UserId>,
    /// The reported listing, if any.
    pub reported_listing: Option<ListingId>,
    /// Why the report was filed.
    pub reason: String,
    /// Free-form details from the reporter.
    pub details: Option<String>,
    /// Current lifecycle state.
    pub status: ReportStatus,
    /// When the report was filed.
    pub created_at: DateTime<Utc>,
}

impl Report {
    /// Build a freshly-persisted report against a user.
    pub fn against_user(reporter: UserId, reported_user: UserId, reason: impl Into<String>) -> Self {
        Self {
            id: ReportId::new(),
            reporter,
            reported_user: Some(reported_user),
            reported_listing: None,
            reason: reason.into(),
            details: None,
            status: ReportStatus::Open,
            created_at: Utc::now(),
        }
    }

    /// Build a freshly-persisted report against a listing.
    pub fn against_listing(
        reporter: UserId,
        reported_listing: ListingId,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: ReportId::new(),
            reporter,
            reported_user: None,
            reported_listing: Some(reported_listing),
            reason: reason.into(),
            details: None,
            status: ReportStatus::Open,
            created_at: Utc::now(),
        }
    }

    /// Check whether the report still needs moderator attention.
    pub fn is_open(&self) -> bool {
        self.status == ReportStatus::Open
    }
}
