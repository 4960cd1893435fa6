//! Presence introspection handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, PresenceResponse};
use crate::state::AppState;

/// GET /api/presence — users with a live connection right now.
pub async fn online_users(State(state): State<AppState>) -> Json<ApiResponse<PresenceResponse>> {
    let online = state.engine.registry().online_users();
    let count = online.len();

    Json(ApiResponse::ok(PresenceResponse { online, count }))
}
