//! Conversion logic between DTOs and domain entities.

use agora_shared::time::timestamp_to_rfc3339;

use crate::{
    domain::{
        ChatMessage, DisplayName, MessageText, OutboundEvent, Room, RoomName, ValueObjectError,
    },
    infrastructure::dto::{http, websocket as ws},
    usecase::RoomDetail,
};

// ========================================
// DTO → Domain Entity
// ========================================

impl ws::JoinRoomPayload {
    /// Validate the payload into the join request the core expects.
    pub fn into_domain(self) -> Result<(DisplayName, RoomName), ValueObjectError> {
        Ok((DisplayName::new(self.username)?, RoomName::new(self.room)?))
    }
}

impl TryFrom<ws::MessagePayload> for ChatMessage {
    type Error = ValueObjectError;

    fn try_from(dto: ws::MessagePayload) -> Result<Self, Self::Error> {
        Ok(Self {
            room: RoomName::new(dto.room)?,
            user: dto.user,
            text: MessageText::new(dto.text)?,
            time: dto.time,
        })
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<ChatMessage> for ws::MessagePayload {
    fn from(model: ChatMessage) -> Self {
        Self {
            room: model.room.into_string(),
            user: model.user,
            text: model.text.into_string(),
            time: model.time,
        }
    }
}

impl From<&OutboundEvent> for ws::ServerFrame {
    fn from(event: &OutboundEvent) -> Self {
        match event {
            OutboundEvent::RoomUsers(roster) => Self::RoomUsers(
                roster.iter().map(|name| name.as_str().to_string()).collect(),
            ),
            OutboundEvent::ReceiveMessage(message) => Self::ReceiveMessage(message.clone().into()),
        }
    }
}

impl From<Room> for http::RoomSummaryDto {
    fn from(room: Room) -> Self {
        Self {
            users: room
                .roster()
                .into_iter()
                .map(DisplayName::into_string)
                .collect(),
            name: room.name.into_string(),
            created_at: timestamp_to_rfc3339(room.created_at),
        }
    }
}

impl From<RoomDetail> for http::RoomDetailDto {
    fn from(detail: RoomDetail) -> Self {
        Self {
            name: detail.name.into_string(),
            users: detail
                .members
                .into_iter()
                .map(|m| http::MemberDetailDto {
                    name: m.display_name.into_string(),
                    connected_at: timestamp_to_rfc3339(m.connected_at),
                })
                .collect(),
            created_at: timestamp_to_rfc3339(detail.created_at),
        }
    }
}
