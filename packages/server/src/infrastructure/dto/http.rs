//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Entry of `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    /// Roster in join order
    pub users: Vec<String>,
    /// RFC 3339 (UTC)
    pub created_at: String,
}

/// Member entry of `GET /api/rooms/{room}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDetailDto {
    pub name: String,
    /// RFC 3339 (UTC)
    pub connected_at: String,
}

/// Response of `GET /api/rooms/{room}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub name: String,
    pub users: Vec<MemberDetailDto>,
    /// RFC 3339 (UTC)
    pub created_at: String,
}

/// Response of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    pub connections: usize,
    pub rooms: usize,
}
