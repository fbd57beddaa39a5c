//! Test helpers for the use cases: an in-memory repository, a real
//! WebSocket pusher and connections whose outbound frames can be inspected.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    domain::{
        ChatMessage, ChatRepository, ConnectionId, DisplayName, MessagePusher, MessageText,
        RoomName,
    },
    infrastructure::{
        dto::websocket::ServerFrame, message_pusher::WebSocketMessagePusher,
        repository::InMemoryChatRepository,
    },
};

pub(crate) fn name(value: &str) -> DisplayName {
    DisplayName::new(value.to_string()).unwrap()
}

pub(crate) fn room(value: &str) -> RoomName {
    RoomName::new(value.to_string()).unwrap()
}

pub(crate) fn message(room_name: &str, user: &str, text: &str) -> ChatMessage {
    ChatMessage {
        room: room(room_name),
        user: user.to_string(),
        text: MessageText::new(text.to_string()).unwrap(),
        time: "t".to_string(),
    }
}

pub(crate) fn create_test_dependencies()
-> (Arc<InMemoryChatRepository>, Arc<WebSocketMessagePusher>) {
    (
        Arc::new(InMemoryChatRepository::new()),
        Arc::new(WebSocketMessagePusher::new()),
    )
}

/// A registered connection and the receiving end of its outbound channel.
pub(crate) struct TestClient {
    pub id: ConnectionId,
    rx: mpsc::UnboundedReceiver<String>,
}

impl TestClient {
    /// Register a new connection in both the repository and the pusher.
    pub async fn connect(
        repository: &InMemoryChatRepository,
        message_pusher: &WebSocketMessagePusher,
    ) -> Self {
        let id = ConnectionId::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        repository.register_connection(id, 1000).await;
        message_pusher.register_client(id, tx).await;
        Self { id, rx }
    }

    /// Drain every frame received so far.
    pub fn frames(&mut self) -> Vec<ServerFrame> {
        let mut frames = Vec::new();
        while let Ok(text) = self.rx.try_recv() {
            frames.push(serde_json::from_str(&text).unwrap());
        }
        frames
    }

    /// Drain frames and keep only the `room_users` rosters.
    pub fn rosters(&mut self) -> Vec<Vec<String>> {
        self.frames()
            .into_iter()
            .filter_map(|frame| match frame {
                ServerFrame::RoomUsers(users) => Some(users),
                ServerFrame::ReceiveMessage(_) => None,
            })
            .collect()
    }
}
