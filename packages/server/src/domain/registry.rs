//! Connection Registry: which connection is who, and where.

use std::collections::HashMap;

use super::{
    entity::Connection,
    value_object::{ConnectionId, DisplayName, RoomName},
};

/// Maps a connection id to its display name and current room.
#[derive(Debug, Default, Clone)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection with unset name and room.
    ///
    /// Returns `false` (and leaves the entry untouched) if the id is already registered.
    pub fn on_connect(&mut self, connection_id: ConnectionId, connected_at: i64) -> bool {
        if self.connections.contains_key(&connection_id) {
            return false;
        }
        self.connections
            .insert(connection_id, Connection::new(connection_id, connected_at));
        true
    }

    /// Remove the connection. Idempotent.
    pub fn on_disconnect(&mut self, connection_id: &ConnectionId) -> Option<Connection> {
        self.connections.remove(connection_id)
    }

    pub fn get(&self, connection_id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(connection_id)
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.connections.contains_key(connection_id)
    }

    /// Record a join and return the display name in effect.
    ///
    /// The display name is set once: if the connection already has one, it is
    /// kept and `display_name` is ignored. Returns `None` for unknown ids.
    pub fn assign(
        &mut self,
        connection_id: &ConnectionId,
        display_name: DisplayName,
        room: RoomName,
    ) -> Option<DisplayName> {
        let connection = self.connections.get_mut(connection_id)?;
        let name = connection
            .display_name
            .get_or_insert(display_name)
            .clone();
        connection.room = Some(room);
        Some(name)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(value: &str) -> DisplayName {
        DisplayName::new(value.to_string()).unwrap()
    }

    fn room(value: &str) -> RoomName {
        RoomName::new(value.to_string()).unwrap()
    }

    #[test]
    fn test_on_connect_registers_unset_connection() {
        // テスト項目: 接続直後は名前・ルームが未設定で登録される
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let id = ConnectionId::generate();

        // when (操作):
        let registered = registry.on_connect(id, 1000);

        // then (期待する結果):
        assert!(registered);
        let connection = registry.get(&id).unwrap();
        assert!(connection.display_name.is_none());
        assert!(connection.room.is_none());
        assert_eq!(connection.connected_at, 1000);
    }

    #[test]
    fn test_on_connect_twice_keeps_first_entry() {
        // テスト項目: 同じ ID の二重登録は無視される
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let id = ConnectionId::generate();
        registry.on_connect(id, 1000);

        // when (操作):
        let registered = registry.on_connect(id, 2000);

        // then (期待する結果):
        assert!(!registered);
        assert_eq!(registry.get(&id).unwrap().connected_at, 1000);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_on_disconnect_is_idempotent() {
        // テスト項目: 切断は冪等で、二回目以降は何もしない
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let id = ConnectionId::generate();
        registry.on_connect(id, 1000);

        // when (操作):
        let first = registry.on_disconnect(&id);
        let second = registry.on_disconnect(&id);

        // then (期待する結果):
        assert!(first.is_some());
        assert!(second.is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_assign_keeps_first_display_name() {
        // テスト項目: 表示名は最初の join で確定し、以降は変更されない
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let id = ConnectionId::generate();
        registry.on_connect(id, 1000);
        registry.assign(&id, name("bob"), room("lobby"));

        // when (操作):
        let effective = registry.assign(&id, name("robert"), room("games"));

        // then (期待する結果):
        assert_eq!(effective, Some(name("bob")));
        let connection = registry.get(&id).unwrap();
        assert_eq!(connection.display_name, Some(name("bob")));
        assert_eq!(connection.room, Some(room("games")));
    }

    #[test]
    fn test_assign_unknown_connection() {
        // テスト項目: 未登録の接続への assign は None を返す
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();

        // when (操作):
        let result = registry.assign(&ConnectionId::generate(), name("bob"), room("lobby"));

        // then (期待する結果):
        assert!(result.is_none());
        assert!(registry.is_empty());
    }
}
