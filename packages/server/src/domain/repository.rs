//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    ConnectionId, DisplayName, RepositoryError, Room, RoomName, entity::Connection,
};

/// Result of a successful [`ChatRepository::join_room`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRoom {
    /// Display name in effect for the connection (fixed at its first join)
    pub display_name: DisplayName,
    /// Rooms the connection was moved out of
    pub left_rooms: Vec<RoomName>,
}

/// Chat Repository trait
///
/// Connection Registry と Room Directory をまとめたデータストアへのインターフェース。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// 接続を登録（名前・ルームは未設定）。既に登録済みなら `false`
    async fn register_connection(&self, connection_id: ConnectionId, connected_at: i64) -> bool;

    /// 接続をルームに参加させる（元のルームからは取り除かれる）
    async fn join_room(
        &self,
        connection_id: ConnectionId,
        display_name: DisplayName,
        room: RoomName,
        now: i64,
    ) -> Result<JoinedRoom, RepositoryError>;

    /// 接続を全てのルームから取り除き、メンバーが変化したルーム名を返す
    async fn leave_all_rooms(&self, connection_id: &ConnectionId) -> Vec<RoomName>;

    /// 接続の登録を削除（冪等）
    async fn remove_connection(&self, connection_id: &ConnectionId) -> Option<Connection>;

    /// 接続情報を取得
    async fn get_connection(&self, connection_id: &ConnectionId) -> Option<Connection>;

    /// ルームのロスター（参加順の表示名リスト）を取得
    async fn members_of(&self, room: &RoomName) -> Vec<DisplayName>;

    /// ルームのメンバーの接続 ID を参加順で取得
    async fn member_ids_of(&self, room: &RoomName) -> Vec<ConnectionId>;

    /// 全ルームのスナップショットを取得（名前順）
    async fn get_rooms(&self) -> Vec<Room>;

    /// ルームを取得
    async fn get_room(&self, room: &RoomName) -> Result<Room, RepositoryError>;

    /// 接続中のクライアント数を取得
    async fn count_connections(&self) -> usize;
}
