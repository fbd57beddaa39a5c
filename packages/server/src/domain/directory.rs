//! Room Directory: room name to ordered member list.
//!
//! ## メンバーシップのポリシー
//!
//! - 1 つの接続が所属できるルームは常に 1 つ。別のルームへ join すると、
//!   先に元のルームから取り除く。
//! - 最後のメンバーがいなくなったルームは削除する。

use std::collections::HashMap;

use super::{
    entity::{Member, Room},
    value_object::{ConnectionId, DisplayName, RoomName},
};

/// Result of [`RoomDirectory::join`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinOutcome {
    /// Rooms the connection was removed from to keep single-room membership
    pub left_rooms: Vec<RoomName>,
    /// `false` if the connection was already a member of the target room
    pub added: bool,
}

/// Owns the membership list of every room.
#[derive(Debug, Default, Clone)]
pub struct RoomDirectory {
    rooms: HashMap<RoomName, Room>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the connection to `room_name`, creating the room if absent.
    ///
    /// The connection is removed from any other room first.
    pub fn join(
        &mut self,
        room_name: RoomName,
        connection_id: ConnectionId,
        display_name: DisplayName,
        now: i64,
    ) -> JoinOutcome {
        let left_rooms = self.remove_member(&connection_id, Some(&room_name));

        let room = self
            .rooms
            .entry(room_name.clone())
            .or_insert_with(|| Room::new(room_name, now));
        let added = room.add_member(Member::new(connection_id, display_name));

        JoinOutcome { left_rooms, added }
    }

    /// Remove the connection from every room.
    ///
    /// Returns the names of rooms whose membership changed. Rooms left empty
    /// are pruned.
    pub fn leave(&mut self, connection_id: &ConnectionId) -> Vec<RoomName> {
        self.remove_member(connection_id, None)
    }

    /// Remove the connection from every room except `keep`, pruning rooms
    /// left empty.
    fn remove_member(
        &mut self,
        connection_id: &ConnectionId,
        keep: Option<&RoomName>,
    ) -> Vec<RoomName> {
        let mut changed: Vec<RoomName> = self
            .rooms
            .values_mut()
            .filter(|room| Some(&room.name) != keep)
            .filter_map(|room| {
                room.remove_member(connection_id)
                    .then(|| room.name.clone())
            })
            .collect();
        changed.sort();
        self.rooms.retain(|_, room| !room.is_empty());
        changed
    }

    /// Ordered display names of the members of `room_name`.
    ///
    /// Empty if the room does not exist or has no members.
    pub fn members_of(&self, room_name: &RoomName) -> Vec<DisplayName> {
        self.rooms
            .get(room_name)
            .map(Room::roster)
            .unwrap_or_default()
    }

    /// Ordered connection ids of the members of `room_name`.
    pub fn member_ids_of(&self, room_name: &RoomName) -> Vec<ConnectionId> {
        self.rooms
            .get(room_name)
            .map(Room::member_ids)
            .unwrap_or_default()
    }

    pub fn get(&self, room_name: &RoomName) -> Option<&Room> {
        self.rooms.get(room_name)
    }

    /// Snapshot of all rooms, sorted by name.
    pub fn rooms(&self) -> Vec<Room> {
        let mut rooms: Vec<Room> = self.rooms.values().cloned().collect();
        rooms.sort_by(|a, b| a.name.cmp(&b.name));
        rooms
    }

    /// Rooms that currently list the connection.
    pub fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<RoomName> {
        let mut names: Vec<RoomName> = self
            .rooms
            .values()
            .filter(|room| room.contains(connection_id))
            .map(|room| room.name.clone())
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
