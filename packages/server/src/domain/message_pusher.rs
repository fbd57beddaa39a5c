//! MessagePusher trait 定義
//!
//! クライアントへのメッセージ送信（通知）の抽象化。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ChatMessage, ConnectionId, DisplayName, MessagePushError};

/// Outbound channel of one connection. Each item is one serialized frame.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Event pushed from the server to clients.
///
/// The wire encoding is chosen by the `MessagePusher` implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// Ordered roster of a room (`room_users`)
    RoomUsers(Vec<DisplayName>),
    /// Relayed chat message (`receive_message`)
    ReceiveMessage(ChatMessage),
}

/// MessagePusher trait
///
/// `sendToRoom` / `sendToRoomExcept` に相当する操作は、呼び出し側が
/// Room Directory から宛先を解決したうえで `broadcast` を使う。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// クライアントの送信チャンネルを登録解除（冪等）
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定のクライアントに送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数のクライアントに送信（一部の失敗は許容）
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError>;
}
