//! Domain layer for the chat relay.
//!
//! This module contains the membership model (Connection Registry and Room
//! Directory) and the interfaces the use cases depend on. It is independent
//! of data transfer objects and infrastructure concerns.

pub mod directory;
pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use directory::{JoinOutcome, RoomDirectory};
pub use entity::{ChatMessage, Connection, Member, Room};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use message_pusher::{MessagePusher, OutboundEvent, PusherChannel};
pub use registry::ConnectionRegistry;
pub use repository::{ChatRepository, JoinedRoom};
pub use value_object::{ConnectionId, DisplayName, MessageText, RoomName};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
