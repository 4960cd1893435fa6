//! Response DTOs.

use serde::{Deserialize, Serialize};

use tradehub_core::types::UserId;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Detailed health response including real-time engine counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Service status.
    pub status: String,
    /// Number of live WebSocket connections.
    pub ws_connections: usize,
    /// Number of distinct users currently online.
    pub online_users: usize,
}

/// Currently-online users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceResponse {
    /// User IDs with a live connection.
    pub online: Vec<UserId>,
    /// Convenience count.
    pub count: usize,
}
