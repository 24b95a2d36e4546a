use serde::{Deserialize, Serialize};

use crate::game::cards::Card;
use crate::protocol::RoomId;

/// User intents sent to the server. Fire-and-forget: no retry, no
/// pending-move state; the server answers with snapshots or an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ClientIntent {
    CreateRoom,
    JoinRoom(RoomId),
    #[serde(rename_all = "camelCase")]
    PlayCard { room_id: RoomId, card: Card },
    #[serde(rename_all = "camelCase")]
    DrawCard { room_id: RoomId },
}
