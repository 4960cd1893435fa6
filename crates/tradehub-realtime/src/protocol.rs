//! Frames sent by browser clients over the WebSocket.

use serde::{Deserialize, Serialize};

use tradehub_core::types::UserId;

/// Messages sent by the client to the server.
///
/// The only inbound frame today is the identity announcement a client sends
/// right after the socket opens. Everything else on the wire flows outbound
/// as serialized [`EventBody`](crate::event::EventBody) frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    /// Announce which user owns this connection.
    Register {
        /// The authenticated user's identifier.
        user_id: UserId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_register_frame() {
        let user_id = UserId::new();
        let raw = format!(r#"{{"type":"register","user_id":"{user_id}"}}"#);
        let frame: ClientFrame = serde_json::from_str(&raw).unwrap();
        assert_eq!(frame, ClientFrame::Register { user_id });
    }

    #[test]
    fn rejects_unknown_frame_types() {
        let raw = r#"{"type":"subscribe","channel":"listings"}"#;
        assert!(serde_json::from_str::<ClientFrame>(raw).is_err());
    }
}
