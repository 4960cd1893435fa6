//! Application state shared across all handlers.

use std::sync::Arc;

use tradehub_core::config::AppConfig;
use tradehub_realtime::RealtimeEngine;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Real-time presence and fan-out engine.
    pub engine: Arc<RealtimeEngine>,
}

impl AppState {
    /// Assemble the state from its already-constructed parts.
    pub fn new(config: Arc<AppConfig>, engine: Arc<RealtimeEngine>) -> Self {
        Self { config, engine }
    }
}
