//! Roster broadcast shared by the join and disconnect use cases.

use crate::domain::{
    ChatRepository, DisplayName, MessagePushError, MessagePusher, OutboundEvent, RoomName,
};

/// Push the current roster of `room` to every member of `room`.
///
/// Returns the roster that was sent. Rooms without members are skipped.
pub(super) async fn broadcast_roster(
    repository: &dyn ChatRepository,
    message_pusher: &dyn MessagePusher,
    room: &RoomName,
) -> Result<Vec<DisplayName>, MessagePushError> {
    let targets = repository.member_ids_of(room).await;
    let roster = repository.members_of(room).await;
    if targets.is_empty() {
        tracing::debug!("Room '{}' has no members, roster not broadcast", room);
        return Ok(roster);
    }

    let event = OutboundEvent::RoomUsers(roster.clone());
    message_pusher.broadcast(targets, &event).await?;
    tracing::info!("Broadcasted roster of room '{}' ({} users)", room, roster.len());

    Ok(roster)
}
