//! InMemory Chat Repository 実装
//!
//! ドメイン層が定義する ChatRepository trait の具体的な実装。
//! Connection Registry と Room Directory を 1 つの Mutex で保護し、
//! 両者の整合性（ルームのメンバーは必ず登録済みの接続）を保ちます。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatRepository, Connection, ConnectionId, ConnectionRegistry, DisplayName, JoinedRoom,
    RepositoryError, Room, RoomDirectory, RoomName,
};

/// Registry and directory guarded together.
#[derive(Debug, Default)]
struct ChatStore {
    registry: ConnectionRegistry,
    directory: RoomDirectory,
}

/// インメモリ Chat Repository 実装
#[derive(Debug, Default)]
pub struct InMemoryChatRepository {
    store: Mutex<ChatStore>,
}

impl InMemoryChatRepository {
    /// 新しい InMemoryChatRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn register_connection(&self, connection_id: ConnectionId, connected_at: i64) -> bool {
        let mut store = self.store.lock().await;
        store.registry.on_connect(connection_id, connected_at)
    }

    async fn join_room(
        &self,
        connection_id: ConnectionId,
        display_name: DisplayName,
        room: RoomName,
        now: i64,
    ) -> Result<JoinedRoom, RepositoryError> {
        let mut store = self.store.lock().await;
        let display_name = store
            .registry
            .assign(&connection_id, display_name, room.clone())
            .ok_or_else(|| RepositoryError::ConnectionNotFound(connection_id.to_string()))?;

        let outcome = store
            .directory
            .join(room, connection_id, display_name.clone(), now);

        Ok(JoinedRoom {
            display_name,
            left_rooms: outcome.left_rooms,
        })
    }

    async fn leave_all_rooms(&self, connection_id: &ConnectionId) -> Vec<RoomName> {
        let mut store = self.store.lock().await;
        store.directory.leave(connection_id)
    }

    async fn remove_connection(&self, connection_id: &ConnectionId) -> Option<Connection> {
        let mut store = self.store.lock().await;
        // ルームに残っていると不変条件が崩れるため、先にディレクトリから外す
        store.directory.leave(connection_id);
        store.registry.on_disconnect(connection_id)
    }

    async fn get_connection(&self, connection_id: &ConnectionId) -> Option<Connection> {
        let store = self.store.lock().await;
        store.registry.get(connection_id).cloned()
    }

    async fn members_of(&self, room: &RoomName) -> Vec<DisplayName> {
        let store = self.store.lock().await;
        store.directory.members_of(room)
    }

    async fn member_ids_of(&self, room: &RoomName) -> Vec<ConnectionId> {
        let store = self.store.lock().await;
        store.directory.member_ids_of(room)
    }

    async fn get_rooms(&self) -> Vec<Room> {
        let store = self.store.lock().await;
        store.directory.rooms()
    }

    async fn get_room(&self, room: &RoomName) -> Result<Room, RepositoryError> {
        let store = self.store.lock().await;
        store
            .directory
            .get(room)
            .cloned()
            .ok_or_else(|| RepositoryError::RoomNotFound(room.to_string()))
    }

    async fn count_connections(&self) -> usize {
        let store = self.store.lock().await;
        store.registry.len()
    }
}
