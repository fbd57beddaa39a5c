//! UseCase 層
//!
//! 各ユースケースは Repository と MessagePusher のトレイトオブジェクトに依存する。
//! Broadcast Router がセッションイベントをユースケースに振り分ける。

mod disconnect_participant;
mod error;
mod get_rooms;
mod join_room;
mod register_connection;
mod roster;
mod router;
mod send_message;
#[cfg(test)]
mod testing;

pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ConnectError, GetRoomDetailError, JoinRoomError, RouterClosed, SendMessageError};
pub use get_rooms::{GetRoomDetailUseCase, GetRoomsUseCase, MemberDetail, RoomDetail};
pub use join_room::JoinRoomUseCase;
pub use register_connection::RegisterConnectionUseCase;
pub use router::{BroadcastRouter, RouterHandle, SessionEvent};
pub use send_message::SendMessageUseCase;
