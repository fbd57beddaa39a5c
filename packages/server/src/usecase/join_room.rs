//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 参加後のロスターが参加者本人を含むルーム全員に送られること
//!
//! ### どのような状況を想定しているか
//! - 正常系：空のルームへの参加、既存メンバーのいるルームへの参加
//! - 別ルームへの移動：元のルームの残りメンバーに更新後のロスターが送られる
//! - 異常系：未登録の接続からの参加

use std::sync::Arc;

use agora_shared::time::Clock;

use crate::domain::{ChatRepository, ConnectionId, DisplayName, MessagePusher, RoomName};

use super::{error::JoinRoomError, roster::broadcast_roster};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続の ID
    /// * `display_name` - 表示名（接続の最初の参加時のみ反映される）
    /// * `room` - 参加するルーム
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<DisplayName>)` - 参加後のロスター（参加順）
    /// * `Err(JoinRoomError)` - 参加失敗
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        display_name: DisplayName,
        room: RoomName,
    ) -> Result<Vec<DisplayName>, JoinRoomError> {
        let now = self.clock.now_millis();

        // 1. Directory に追加（別のルームにいれば先に取り除かれる）
        let joined = self
            .repository
            .join_room(connection_id, display_name, room.clone(), now)
            .await
            .map_err(|_| JoinRoomError::NotConnected(connection_id.to_string()))?;
        tracing::info!(
            "Connection '{}' joined room '{}' as '{}'",
            connection_id,
            room,
            joined.display_name.as_str()
        );

        // 2. 移動元のルームに更新後のロスターを送る
        for left_room in &joined.left_rooms {
            tracing::info!("Connection '{}' left room '{}'", connection_id, left_room);
            if let Err(e) = broadcast_roster(
                self.repository.as_ref(),
                self.message_pusher.as_ref(),
                left_room,
            )
            .await
            {
                tracing::warn!("Failed to broadcast roster of room '{}': {}", left_room, e);
            }
        }

        // 3. 参加先のルーム全員（本人を含む）にロスターを送る
        broadcast_roster(
            self.repository.as_ref(),
            self.message_pusher.as_ref(),
            &room,
        )
        .await
        .map_err(|e| JoinRoomError::BroadcastFailed(e.to_string()))
    }
}
