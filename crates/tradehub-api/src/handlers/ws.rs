//! WebSocket upgrade handler.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{debug, error, warn};

use tradehub_realtime::protocol::ClientFrame;

use crate::state::AppState;

/// GET /ws — WebSocket upgrade.
///
/// The session starts anonymous; the client announces its identity with a
/// `register` frame once the socket is open.
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_ws_connection(state, socket))
}

/// Drives an established WebSocket connection through its lifecycle.
async fn handle_ws_connection(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (mut lifecycle, mut outbound_rx) = state.engine.open_session();

    // Forward dispatched events to the client as JSON text frames.
    let outbound_task = tokio::spawn(async move {
        while let Some(body) = outbound_rx.recv().await {
            let text = match serde_json::to_string(&body) {
                Ok(text) => text,
                Err(e) => {
                    error!(error = %e, "Failed to serialize outbound event");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // Process inbound frames until the transport goes away.
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientFrame>(&text) {
                Ok(ClientFrame::Register { user_id }) => {
                    lifecycle.announce(user_id);
                }
                Err(e) => {
                    debug!(error = %e, "Ignoring malformed client frame");
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    lifecycle.finish();
}
