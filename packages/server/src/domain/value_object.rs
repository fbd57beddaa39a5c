//! Value objects for the chat domain.
//!
//! 全ての値オブジェクトは生成時にバリデーションされるため、
//! ドメイン層・UseCase 層では常に正しい値であることを前提にできる。

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::error::ValueObjectError;

/// Maximum length (in characters) of a display name.
pub const MAX_DISPLAY_NAME_LENGTH: usize = 64;
/// Maximum length (in characters) of a room name.
pub const MAX_ROOM_NAME_LENGTH: usize = 64;
/// Maximum length (in characters) of a chat message body.
pub const MAX_MESSAGE_TEXT_LENGTH: usize = 2000;

/// Opaque identifier of one live transport session.
///
/// Assigned by the gateway when the WebSocket is upgraded and stable for the
/// lifetime of the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// 新しい ConnectionId をランダムに生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ConnectionId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validate a trimmed, non-empty, length-bounded string.
fn validate_text(
    value: String,
    max_length: usize,
    empty: ValueObjectError,
    too_long: fn(usize) -> ValueObjectError,
) -> Result<String, ValueObjectError> {
    if value.trim().is_empty() {
        return Err(empty);
    }
    let length = value.chars().count();
    if length > max_length {
        return Err(too_long(length));
    }
    Ok(value)
}

/// Name shown in a room roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_text(
            value,
            MAX_DISPLAY_NAME_LENGTH,
            ValueObjectError::DisplayNameEmpty,
            ValueObjectError::DisplayNameTooLong,
        )
        .map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Name of a chat room (the room's unique key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_text(
            value,
            MAX_ROOM_NAME_LENGTH,
            ValueObjectError::RoomNameEmpty,
            ValueObjectError::RoomNameTooLong,
        )
        .map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_text(
            value,
            MAX_MESSAGE_TEXT_LENGTH,
            ValueObjectError::MessageTextEmpty,
            ValueObjectError::MessageTextTooLong,
        )
        .map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageText {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_generate_is_unique() {
        // テスト項目: 生成される ConnectionId は毎回異なる
        // given (前提条件):

        // when (操作):
        let a = ConnectionId::generate();
        let b = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_name_valid() {
        // テスト項目: 通常の名前は DisplayName として受け入れられ、値は変更されない
        // given (前提条件):
        let value = "bob".to_string();

        // when (操作):
        let result = DisplayName::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "bob");
    }

    #[test]
    fn test_display_name_empty_and_whitespace_rejected() {
        // テスト項目: 空文字列・空白のみの名前は拒否される
        // given (前提条件):

        // when (操作):
        let empty = DisplayName::new(String::new());
        let blank = DisplayName::new("   ".to_string());

        // then (期待する結果):
        assert_eq!(empty, Err(ValueObjectError::DisplayNameEmpty));
        assert_eq!(blank, Err(ValueObjectError::DisplayNameEmpty));
    }

    #[test]
    fn test_display_name_too_long_rejected() {
        // テスト項目: 上限を超える長さの名前は拒否される
        // given (前提条件):
        let value = "a".repeat(MAX_DISPLAY_NAME_LENGTH + 1);

        // when (操作):
        let result = DisplayName::new(value);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::DisplayNameTooLong(
                MAX_DISPLAY_NAME_LENGTH + 1
            ))
        );
    }

    #[test]
    fn test_length_is_counted_in_characters() {
        // テスト項目: 長さはバイト数ではなく文字数で数えられる
        // given (前提条件): マルチバイト文字で上限ちょうど
        let value = "あ".repeat(MAX_ROOM_NAME_LENGTH);

        // when (操作):
        let result = RoomName::new(value);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_room_name_empty_rejected() {
        // テスト項目: 空のルーム名は拒否される
        // given (前提条件):

        // when (操作):
        let result = RoomName::try_from(String::new());

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::RoomNameEmpty));
    }

    #[test]
    fn test_message_text_limits() {
        // テスト項目: メッセージ本文は空・上限超過が拒否され、上限ちょうどは受け入れられる
        // given (前提条件):
        let max = "x".repeat(MAX_MESSAGE_TEXT_LENGTH);
        let over = "x".repeat(MAX_MESSAGE_TEXT_LENGTH + 1);

        // when (操作) / then (期待する結果):
        assert!(MessageText::new(max).is_ok());
        assert!(matches!(
            MessageText::new(over),
            Err(ValueObjectError::MessageTextTooLong(_))
        ));
        assert_eq!(
            MessageText::new(" \n".to_string()),
            Err(ValueObjectError::MessageTextEmpty)
        );
    }
}
