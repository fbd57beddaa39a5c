//! Domain error types.

use thiserror::Error;

/// Validation errors raised when constructing value objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("display name must not be empty")]
    DisplayNameEmpty,

    #[error("display name is too long ({0} characters)")]
    DisplayNameTooLong(usize),

    #[error("room name must not be empty")]
    RoomNameEmpty,

    #[error("room name is too long ({0} characters)")]
    RoomNameTooLong(usize),

    #[error("message text must not be empty")]
    MessageTextEmpty,

    #[error("message text is too long ({0} characters)")]
    MessageTextTooLong(usize),
}

/// Errors raised by a [`ChatRepository`](super::ChatRepository).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The connection was never registered (or has already disconnected)
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),

    /// The room does not exist
    #[error("room '{0}' not found")]
    RoomNotFound(String),
}

/// Errors raised by a [`MessagePusher`](super::MessagePusher).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// No outbound channel is registered for the connection
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    /// The event could not be encoded for the wire
    #[error("failed to encode message: {0}")]
    EncodeFailed(String),

    /// The outbound channel is closed
    #[error("failed to push message: {0}")]
    PushFailed(String),
}
