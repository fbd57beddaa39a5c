//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 切断時に全ルームから取り除かれ、残りのメンバーに更新後のロスターが送られること
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 人のルームから 1 人が切断
//! - エッジケース：最後のメンバーの切断（通知対象なし、ルームは削除される）
//! - 冪等性：未参加・未登録・切断済みの接続の切断は何もしない

use std::sync::Arc;

use crate::domain::{ChatRepository, ConnectionId, MessagePusher, RoomName};

use super::roster::broadcast_roster;

/// 切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// 失敗しない。既に削除済みの接続に対しては何もしない。
    ///
    /// # Returns
    ///
    /// メンバーが変化したルーム名のリスト
    pub async fn execute(&self, connection_id: ConnectionId) -> Vec<RoomName> {
        // 1. 全てのルームから取り除く（Registry のエントリはまだ残す）
        let changed_rooms = self.repository.leave_all_rooms(&connection_id).await;

        // 2. 送信チャンネルを登録解除
        self.message_pusher.unregister_client(&connection_id).await;

        // 3. メンバーが変化したルームの残りのメンバーにロスターを送る
        for room in &changed_rooms {
            if let Err(e) = broadcast_roster(
                self.repository.as_ref(),
                self.message_pusher.as_ref(),
                room,
            )
            .await
            {
                tracing::warn!("Failed to broadcast roster of room '{}': {}", room, e);
            }
        }

        // 4. Registry から削除
        match self.repository.remove_connection(&connection_id).await {
            Some(connection) => tracing::info!(
                "Connection '{}' ({}) disconnected",
                connection_id,
                connection
                    .display_name
                    .as_ref()
                    .map(|name| name.as_str())
                    .unwrap_or("unjoined")
            ),
            None => tracing::debug!(
                "Connection '{}' was already removed, nothing to do",
                connection_id
            ),
        }

        changed_rooms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::testing::{TestClient, create_test_dependencies, name, room};

    #[tokio::test]
    async fn test_disconnect_broadcasts_remaining_roster() {
        // テスト項目: 2 人のルームから bob が切断すると carol に ["carol"] が届く
        // given (前提条件):
        let (repository, message_pusher) = create_test_dependencies();
        let usecase = DisconnectParticipantUseCase::new(repository.clone(), message_pusher.clone());
        let mut bob = TestClient::connect(&repository, &message_pusher).await;
        let mut carol = TestClient::connect(&repository, &message_pusher).await;
        repository
            .join_room(bob.id, name("bob"), room("lobby"), 1)
            .await
            .unwrap();
        repository
            .join_room(carol.id, name("carol"), room("lobby"), 2)
            .await
            .unwrap();

        // when (操作):
        let changed = usecase.execute(bob.id).await;

        // then (期待する結果):
        assert_eq!(changed, vec![room("lobby")]);
        assert_eq!(carol.rosters(), vec![vec!["carol".to_string()]]);
        assert!(bob.frames().is_empty());
        assert_eq!(repository.members_of(&room("lobby")).await, vec![name("carol")]);
        assert!(repository.get_connection(&bob.id).await.is_none());
    }

    #[tokio::test]
    async fn test_disconnect_last_member_prunes_room() {
        // テスト項目: 最後のメンバーが切断するとルームが削除され、誰にも送信されない
        // given (前提条件):
        let (repository, message_pusher) = create_test_dependencies();
        let usecase = DisconnectParticipantUseCase::new(repository.clone(), message_pusher.clone());
        let bob = TestClient::connect(&repository, &message_pusher).await;
        repository
            .join_room(bob.id, name("bob"), room("lobby"), 1)
            .await
            .unwrap();

        // when (操作):
        let changed = usecase.execute(bob.id).await;

        // then (期待する結果):
        assert_eq!(changed, vec![room("lobby")]);
        assert!(repository.get_rooms().await.is_empty());
        assert_eq!(repository.count_connections().await, 0);
    }

    #[tokio::test]
    async fn test_disconnect_unjoined_connection() {
        // テスト項目: ルームに参加していない接続の切断は Registry から削除するだけ
        // given (前提条件):
        let (repository, message_pusher) = create_test_dependencies();
        let usecase = DisconnectParticipantUseCase::new(repository.clone(), message_pusher.clone());
        let bob = TestClient::connect(&repository, &message_pusher).await;

        // when (操作):
        let changed = usecase.execute(bob.id).await;

        // then (期待する結果):
        assert!(changed.is_empty());
        assert_eq!(repository.count_connections().await, 0);
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        // テスト項目: 同じ接続を二回切断しても、未知の接続を切断してもエラーにならない
        // given (前提条件):
        let (repository, message_pusher) = create_test_dependencies();
        let usecase = DisconnectParticipantUseCase::new(repository.clone(), message_pusher.clone());
        let bob = TestClient::connect(&repository, &message_pusher).await;
        repository
            .join_room(bob.id, name("bob"), room("lobby"), 1)
            .await
            .unwrap();
        usecase.execute(bob.id).await;

        // when (操作):
        let again = usecase.execute(bob.id).await;
        let unknown = usecase.execute(ConnectionId::generate()).await;

        // then (期待する結果):
        assert!(again.is_empty());
        assert!(unknown.is_empty());
    }
}
