use std::collections::HashMap;
use std::fmt::Display;

use crate::game::cards::Card;
use crate::protocol::{ClientIntent, PlayerId, RoomId, ServerEvent, Snapshot};

/// Minimum length of a room code accepted before we bother the server.
pub const MIN_ROOM_CODE_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// A create/join intent went out, no room event came back yet.
    RoomPending,
    RoomJoined,
    InGame,
}

/// User-facing notice produced by the store. Never mutates game data;
/// the UI decides how to show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    RoomCreated(RoomId),
    GameStarted,
    CardDrawn,
    Rejected(IntentError),
    Server(String),
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::RoomCreated(id) => write!(f, "Room created, code: {}", id),
            Notice::GameStarted => write!(f, "The game has started!"),
            Notice::CardDrawn => write!(f, "Card drawn"),
            Notice::Rejected(err) => write!(f, "{}", err),
            Notice::Server(msg) => write!(f, "[Server] {}", msg),
        }
    }
}

/// Locally caught intent failures. These never reach the wire; the server
/// enforces the same rules again on its side.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntentError {
    #[error("Not your turn")]
    NotYourTurn,
    #[error("Join or create a room first")]
    NoRoom,
    #[error("The game has not started yet")]
    GameNotStarted,
    #[error("Room code must be at least {MIN_ROOM_CODE_LEN} characters")]
    RoomCodeTooShort,
}

/// Client-side mirror of the authoritative game state.
///
/// Inbound [`ServerEvent`]s are folded in through [`GameStore::apply`];
/// every snapshot-bearing event overwrites its fields wholesale, the sole
/// exception being `CardDrawn`, which touches only the local hand. The
/// store trusts every snapshot it receives — legality checks here only
/// drive UI affordances.
#[derive(Debug, Clone, Default)]
pub struct GameStore {
    my_id: Option<PlayerId>,
    room_id: Option<RoomId>,
    players: Vec<PlayerId>,
    hands: HashMap<PlayerId, Vec<Card>>,
    current_card: Option<Card>,
    turn_index: usize,
    phase: Phase,
}

impl GameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn my_id(&self) -> Option<&str> {
        self.my_id.as_deref()
    }

    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn hand_of(&self, player: &str) -> &[Card] {
        self.hands.get(player).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn my_hand(&self) -> &[Card] {
        match &self.my_id {
            Some(id) => self.hand_of(id),
            None => &[],
        }
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.current_card.as_ref()
    }

    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.phase == Phase::InGame
    }

    pub fn is_my_turn(&self) -> bool {
        self.started()
            && self.my_id.is_some()
            && self.players.get(self.turn_index).map(String::as_str) == self.my_id()
    }

    /// Folds one inbound event into the mirror. Returns the notices the
    /// event produced; repeated delivery of the same snapshot is harmless.
    pub fn apply(&mut self, event: ServerEvent) -> Vec<Notice> {
        match event {
            ServerEvent::Connected { player_id } => {
                // Identity is assigned once and never changes mid-session.
                if self.my_id.is_none() {
                    self.my_id = Some(player_id);
                }
                Vec::new()
            }
            ServerEvent::RoomCreated(room_id) => {
                self.room_id = Some(room_id.clone());
                if self.players.is_empty() {
                    if let Some(id) = &self.my_id {
                        self.players.push(id.clone());
                    }
                }
                self.phase = Phase::RoomJoined;
                vec![Notice::RoomCreated(room_id)]
            }
            ServerEvent::PlayerList { players, room_id } => {
                // Wholesale replacement; players may join, leave or be
                // reordered before the game starts.
                self.players = players;
                self.room_id = Some(room_id);
                if self.phase != Phase::InGame {
                    self.phase = Phase::RoomJoined;
                }
                Vec::new()
            }
            ServerEvent::GameStarted(snapshot) => {
                // A repeat while in game is a fresh hard reset.
                self.phase = Phase::InGame;
                self.overwrite(snapshot);
                vec![Notice::GameStarted]
            }
            ServerEvent::GameStateUpdate(snapshot) => {
                self.overwrite(snapshot);
                Vec::new()
            }
            ServerEvent::CardDrawn(hand) => match &self.my_id {
                Some(id) => {
                    self.hands.insert(id.clone(), hand);
                    vec![Notice::CardDrawn]
                }
                // No identity yet, nothing to merge into: announce nothing.
                None => Vec::new(),
            },
            ServerEvent::ErrorMessage(message) => vec![Notice::Server(message)],
        }
    }

    fn overwrite(&mut self, snapshot: Snapshot) {
        self.hands = snapshot.hands;
        self.current_card = snapshot.current_card;
        self.turn_index = snapshot.turn_index;
    }

    pub fn create_room(&mut self) -> ClientIntent {
        if self.phase == Phase::Idle {
            self.phase = Phase::RoomPending;
        }
        ClientIntent::CreateRoom
    }

    /// Validates and normalizes a room code typed by the user.
    pub fn join_room(&mut self, code: &str) -> Result<ClientIntent, IntentError> {
        let code = code.trim().to_uppercase();
        if code.len() < MIN_ROOM_CODE_LEN {
            return Err(IntentError::RoomCodeTooShort);
        }
        if self.phase == Phase::Idle {
            self.phase = Phase::RoomPending;
        }
        Ok(ClientIntent::JoinRoom(code))
    }

    pub fn play_card(&self, card: Card) -> Result<ClientIntent, IntentError> {
        let room_id = self.guard_turn()?;
        Ok(ClientIntent::PlayCard { room_id, card })
    }

    pub fn draw_card(&self) -> Result<ClientIntent, IntentError> {
        let room_id = self.guard_turn()?;
        Ok(ClientIntent::DrawCard { room_id })
    }

    // Advisory guard: the server re-checks turn order regardless.
    fn guard_turn(&self) -> Result<RoomId, IntentError> {
        let room_id = self.room_id.clone().ok_or(IntentError::NoRoom)?;
        if !self.started() {
            return Err(IntentError::GameNotStarted);
        }
        if !self.is_my_turn() {
            return Err(IntentError::NotYourTurn);
        }
        Ok(room_id)
    }
}
