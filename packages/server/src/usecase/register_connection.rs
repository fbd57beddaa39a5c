//! UseCase: 接続登録処理
//!
//! トランスポートの接続直後に呼ばれ、Connection Registry への登録と
//! 送信チャンネルの MessagePusher への登録を行う。

use std::sync::Arc;

use agora_shared::time::Clock;

use crate::domain::{ChatRepository, ConnectionId, MessagePusher, PusherChannel};

use super::error::ConnectError;

/// 接続登録のユースケース
pub struct RegisterConnectionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl RegisterConnectionUseCase {
    /// 新しい RegisterConnectionUseCase を作成
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

    /// 接続登録を実行
    ///
    /// # Returns
    ///
    /// * `Ok(i64)` - 登録時刻（ミリ秒）
    /// * `Err(ConnectError)` - 既に同じ ID が登録されている
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<i64, ConnectError> {
        let connected_at = self.clock.now_millis();

        // 1. Registry に登録（名前・ルームは未設定）
        if !self
            .repository
            .register_connection(connection_id, connected_at)
            .await
        {
            return Err(ConnectError::DuplicateConnection(connection_id.to_string()));
        }

        // 2. MessagePusher に送信チャンネルを登録
        self.message_pusher
            .register_client(connection_id, sender)
            .await;

        Ok(connected_at)
    }
}
