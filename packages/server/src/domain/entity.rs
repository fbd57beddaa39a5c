//! Entities of the chat domain.

use serde::Serialize;

use super::value_object::{ConnectionId, DisplayName, MessageText, RoomName};

/// One live transport session.
///
/// `display_name` and `room` stay unset until the connection joins a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub display_name: Option<DisplayName>,
    pub room: Option<RoomName>,
    /// Unix timestamp (milliseconds) when the connection was registered
    pub connected_at: i64,
}

impl Connection {
    pub fn new(id: ConnectionId, connected_at: i64) -> Self {
        Self {
            id,
            display_name: None,
            room: None,
            connected_at,
        }
    }

    pub fn is_joined(&self) -> bool {
        self.room.is_some()
    }
}

/// A (connection, display name) pair inside a room's member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub connection_id: ConnectionId,
    pub display_name: DisplayName,
}

impl Member {
    pub fn new(connection_id: ConnectionId, display_name: DisplayName) -> Self {
        Self {
            connection_id,
            display_name,
        }
    }
}

/// A named chat channel.
///
/// `members` is kept in join order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    pub name: RoomName,
    pub members: Vec<Member>,
    /// Unix timestamp (milliseconds) when the room was created
    pub created_at: i64,
}

impl Room {
    pub fn new(name: RoomName, created_at: i64) -> Self {
        Self {
            name,
            members: Vec::new(),
            created_at,
        }
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.members
            .iter()
            .any(|m| &m.connection_id == connection_id)
    }

    /// Append a member. Returns `false` if the connection is already present.
    pub fn add_member(&mut self, member: Member) -> bool {
        if self.contains(&member.connection_id) {
            return false;
        }
        self.members.push(member);
        true
    }

    /// Remove every entry for the connection. Returns `true` if anything was removed.
    pub fn remove_member(&mut self, connection_id: &ConnectionId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| &m.connection_id != connection_id);
        self.members.len() != before
    }

    /// Ordered display names of the current members (the roster).
    pub fn roster(&self) -> Vec<DisplayName> {
        self.members.iter().map(|m| m.display_name.clone()).collect()
    }

    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.members.iter().map(|m| m.connection_id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A chat message relayed to room peers. Never stored.
///
/// `user` and `time` are forwarded as the sender supplied them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub room: RoomName,
    pub user: String,
    pub text: MessageText,
    pub time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str) -> Member {
        Member::new(
            ConnectionId::generate(),
            DisplayName::new(name.to_string()).unwrap(),
        )
    }

    fn room(name: &str) -> Room {
        Room::new(RoomName::new(name.to_string()).unwrap(), 1000)
    }

    #[test]
    fn test_room_roster_keeps_join_order() {
        // テスト項目: ロスターは参加順に並ぶ
        // given (前提条件):
        let mut room = room("lobby");

        // when (操作):
        room.add_member(member("carol"));
        room.add_member(member("alice"));
        room.add_member(member("bob"));

        // then (期待する結果):
        let names: Vec<&str> = room.members.iter().map(|m| m.display_name.as_str()).collect();
        assert_eq!(names, vec!["carol", "alice", "bob"]);
    }

    #[test]
    fn test_room_add_member_rejects_duplicate_connection() {
        // テスト項目: 同じ接続を二重に追加できない
        // given (前提条件):
        let mut room = room("lobby");
        let bob = member("bob");
        room.add_member(bob.clone());

        // when (操作):
        let added = room.add_member(bob);

        // then (期待する結果):
        assert!(!added);
        assert_eq!(room.members.len(), 1);
    }

    #[test]
    fn test_room_remove_member() {
        // テスト項目: メンバーを削除でき、存在しない場合は false が返る
        // given (前提条件):
        let mut room = room("lobby");
        let bob = member("bob");
        room.add_member(bob.clone());

        // when (操作):
        let first = room.remove_member(&bob.connection_id);
        let second = room.remove_member(&bob.connection_id);

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert!(room.is_empty());
    }

    #[test]
    fn test_connection_starts_unjoined() {
        // テスト項目: 新しい接続は名前・ルームが未設定
        // given (前提条件):

        // when (操作):
        let connection = Connection::new(ConnectionId::generate(), 42);

        // then (期待する結果):
        assert!(!connection.is_joined());
        assert!(connection.display_name.is_none());
        assert_eq!(connection.connected_at, 42);
    }
}
