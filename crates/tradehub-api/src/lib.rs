//! # tradehub-api
//!
//! HTTP surface for the TradeHub real-time core: the WebSocket upgrade
//! endpoint that feeds the connection lifecycle, plus health and presence
//! introspection routes. The producing REST endpoints (messages,
//! notifications, reports) live with the CRUD service and reach this crate
//! only through [`tradehub_realtime::EventDispatcher`].

pub mod dto;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
