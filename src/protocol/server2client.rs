use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::game::cards::Card;
use crate::protocol::{PlayerId, RoomId};

/// Full game snapshot as pushed by the server. Always a complete
/// replacement, never a delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub hands: HashMap<PlayerId, Vec<Card>>,
    pub current_card: Option<Card>,
    pub turn_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// First message of a session; assigns the local identity.
    #[serde(rename_all = "camelCase")]
    Connected { player_id: PlayerId },
    RoomCreated(RoomId),
    #[serde(rename_all = "camelCase")]
    PlayerList {
        players: Vec<PlayerId>,
        room_id: RoomId,
    },
    GameStarted(Snapshot),
    GameStateUpdate(Snapshot),
    /// The local player's new hand after a draw. The only player-scoped
    /// update in the protocol.
    CardDrawn(Vec<Card>),
    ErrorMessage(String),
}
