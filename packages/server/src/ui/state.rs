//! Shared application state.

use std::sync::Arc;

use crate::usecase::{GetRoomDetailUseCase, GetRoomsUseCase, RouterHandle};

/// Shared application state
pub struct AppState {
    /// Broadcast Router への送信口（WebSocket ハンドラが使う）
    pub router: RouterHandle,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
