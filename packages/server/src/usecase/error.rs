//! UseCase 層のエラー定義

use thiserror::Error;

/// 接続登録のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("connection '{0}' is already registered")]
    DuplicateConnection(String),
}

/// ルーム参加のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    /// 接続が登録されていない（既に切断済みを含む）
    #[error("connection '{0}' is not registered")]
    NotConnected(String),

    #[error("failed to broadcast roster: {0}")]
    BroadcastFailed(String),
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("failed to relay message: {0}")]
    BroadcastFailed(String),
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room not found")]
    RoomNotFound,

    #[error("invalid room name")]
    InvalidRoomName,
}

/// Broadcast Router のタスクが既に停止している
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("broadcast router is not running")]
pub struct RouterClosed;
