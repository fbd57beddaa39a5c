//! WebSocket frame DTOs.
//!
//! Every frame is a JSON envelope `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ValueObjectError;

/// Payload of `join_room`.
///
/// Missing fields deserialize as empty strings so that they are reported as
/// validation errors rather than as malformed frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRoomPayload {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub room: String,
}

/// Payload of `send_message` and `receive_message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub time: String,
}

/// Client → server frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientFrame {
    JoinRoom(JoinRoomPayload),
    SendMessage(MessagePayload),
}

/// Server → client frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerFrame {
    /// Ordered roster of the room
    RoomUsers(Vec<String>),
    ReceiveMessage(MessagePayload),
}

impl ServerFrame {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Errors raised while turning an inbound text frame into a session event.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),

    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] ValueObjectError),
}

/// Parse one inbound text frame.
pub fn parse_client_frame(text: &str) -> Result<ClientFrame, ProtocolError> {
    Ok(serde_json::from_str(text)?)
}
