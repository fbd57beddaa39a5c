//! UseCase: メッセージ中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 宛先の選定（`message.room` のメンバーから送信者を除く）
//!
//! ### どのような状況を想定しているか
//! - 正常系：送信者以外のメンバー全員に届く
//! - エッジケース：送信者だけのルーム（宛先なし）、他のルームには届かない
//! - 既知のギャップ：送信者が `message.room` のメンバーかどうかは検証しない

use std::sync::Arc;

use crate::domain::{ChatMessage, ChatRepository, ConnectionId, MessagePusher, OutboundEvent};

use super::error::SendMessageError;

/// メッセージ中継のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// メッセージ中継を実行
    ///
    /// メッセージは保存されず、そのまま `message.room` の他のメンバーに送られる。
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - 中継先の接続 ID リスト
    /// * `Err(SendMessageError)` - 中継失敗
    pub async fn execute(
        &self,
        from: ConnectionId,
        message: ChatMessage,
    ) -> Result<Vec<ConnectionId>, SendMessageError> {
        // 1. 中継先を取得（ルームのメンバーから送信者を除く）
        let targets = self.get_relay_targets(&from, &message).await;
        if targets.is_empty() {
            tracing::debug!(
                "No peers in room '{}' for message from '{}'",
                message.room,
                from
            );
            return Ok(targets);
        }

        // 2. MessagePusher を使って中継
        let room = message.room.clone();
        self.message_pusher
            .broadcast(targets.clone(), &OutboundEvent::ReceiveMessage(message))
            .await
            .map_err(|e| SendMessageError::BroadcastFailed(e.to_string()))?;
        tracing::info!(
            "Relayed message from '{}' to {} peers in room '{}'",
            from,
            targets.len(),
            room
        );

        Ok(targets)
    }

    async fn get_relay_targets(
        &self,
        exclude: &ConnectionId,
        message: &ChatMessage,
    ) -> Vec<ConnectionId> {
        self.repository
            .member_ids_of(&message.room)
            .await
            .into_iter()
            .filter(|id| id != exclude)
            .collect()
    }
}
