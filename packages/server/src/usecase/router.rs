//! Broadcast Router: セッションイベントを各ユースケースに振り分ける
//!
//! `spawn()` で単一のタスクとして起動すると、全てのイベントが受信順に一つずつ
//! 処理される。同じルームに対するロスターの送信順はこの処理順に一致する。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - BroadcastRouter::dispatch() による join / message / disconnect の一連の流れ
//! - RouterHandle 経由で送ったイベントが順番通りに処理されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加・中継・切断
//! - 異常系：Connect 前の Join（無視される）、停止済みの Router への送信

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};

use crate::domain::{ChatMessage, ConnectionId, DisplayName, PusherChannel, RoomName};

use super::{
    disconnect_participant::DisconnectParticipantUseCase, error::RouterClosed,
    join_room::JoinRoomUseCase, register_connection::RegisterConnectionUseCase,
    send_message::SendMessageUseCase,
};

/// Session Gateway から Router へ送られるイベント
#[derive(Debug)]
pub enum SessionEvent {
    /// トランスポートが接続された
    Connect {
        connection_id: ConnectionId,
        channel: PusherChannel,
    },
    Join {
        connection_id: ConnectionId,
        username: DisplayName,
        room: RoomName,
    },
    Message {
        connection_id: ConnectionId,
        message: ChatMessage,
    },
    /// トランスポートが閉じられた（接続ごとに一度だけ送られる）
    Disconnect { connection_id: ConnectionId },
}

impl SessionEvent {
    pub fn connection_id(&self) -> ConnectionId {
        match self {
            Self::Connect { connection_id, .. }
            | Self::Join { connection_id, .. }
            | Self::Message { connection_id, .. }
            | Self::Disconnect { connection_id } => *connection_id,
        }
    }
}

pub struct BroadcastRouter {
    register_connection_usecase: Arc<RegisterConnectionUseCase>,
    join_room_usecase: Arc<JoinRoomUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
}

impl BroadcastRouter {
    pub fn new(
        register_connection_usecase: Arc<RegisterConnectionUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    ) -> Self {
        Self {
            register_connection_usecase,
            join_room_usecase,
            send_message_usecase,
            disconnect_participant_usecase,
        }
    }

    /// イベントを一つ処理する
    ///
    /// 失敗はログに記録するだけで、呼び出し元には返さない。
    pub async fn dispatch(&self, event: SessionEvent) {
        match event {
            SessionEvent::Connect {
                connection_id,
                channel,
            } => match self
                .register_connection_usecase
                .execute(connection_id, channel)
                .await
            {
                Ok(_) => tracing::info!("Connection '{}' registered", connection_id),
                Err(e) => tracing::warn!("Failed to register connection: {}", e),
            },
            SessionEvent::Join {
                connection_id,
                username,
                room,
            } => {
                if let Err(e) = self
                    .join_room_usecase
                    .execute(connection_id, username, room)
                    .await
                {
                    tracing::warn!("Failed to join room: {}", e);
                }
            }
            SessionEvent::Message {
                connection_id,
                message,
            } => {
                if let Err(e) = self
                    .send_message_usecase
                    .execute(connection_id, message)
                    .await
                {
                    tracing::warn!("Failed to send message: {}", e);
                }
            }
            SessionEvent::Disconnect { connection_id } => {
                self.disconnect_participant_usecase
                    .execute(connection_id)
                    .await;
            }
        }
    }

    /// Router を単一のタスクとして起動する
    ///
    /// 全ての `RouterHandle` が drop されるとタスクは終了する。
    pub fn spawn(self) -> (RouterHandle, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<SessionEvent>();
        let task = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                self.dispatch(event).await;
            }
            tracing::info!("Broadcast router stopped");
        });

        (RouterHandle { tx }, task)
    }
}

/// Router タスクへの送信口
#[derive(Debug, Clone)]
pub struct RouterHandle {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl RouterHandle {
    pub fn send(&self, event: SessionEvent) -> Result<(), RouterClosed> {
        self.tx.send(event).map_err(|_| RouterClosed)
    }
}
