//! UseCase: ルーム一覧・ルーム詳細の取得（HTTP API 用の読み取り専用処理）

use std::sync::Arc;

use crate::domain::{ChatRepository, DisplayName, Room, RoomName};

use super::error::GetRoomDetailError;

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn ChatRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// 全ルームを名前順で取得
    pub async fn execute(&self) -> Vec<Room> {
        self.repository.get_rooms().await
    }

    /// 接続中のクライアント数を取得
    pub async fn count_connections(&self) -> usize {
        self.repository.count_connections().await
    }
}

/// Member of a [`RoomDetail`], joined with its registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDetail {
    pub display_name: DisplayName,
    pub connected_at: i64,
}

/// Read model for a single room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetail {
    pub name: RoomName,
    pub members: Vec<MemberDetail>,
    pub created_at: i64,
}

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    repository: Arc<dyn ChatRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// ルーム詳細を取得
    ///
    /// # Arguments
    ///
    /// * `room_name` - パスパラメータのルーム名（未検証）
    pub async fn execute(&self, room_name: String) -> Result<RoomDetail, GetRoomDetailError> {
        let room_name =
            RoomName::new(room_name).map_err(|_| GetRoomDetailError::InvalidRoomName)?;
        let room = self
            .repository
            .get_room(&room_name)
            .await
            .map_err(|_| GetRoomDetailError::RoomNotFound)?;

        let mut members = Vec::with_capacity(room.members.len());
        for member in room.members {
            match self.repository.get_connection(&member.connection_id).await {
                Some(connection) => members.push(MemberDetail {
                    display_name: member.display_name,
                    connected_at: connection.connected_at,
                }),
                // 取得の間に切断された
                None => continue,
            }
        }

        Ok(RoomDetail {
            name: room.name,
            members,
            created_at: room.created_at,
        })
    }
}
