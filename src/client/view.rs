use crate::client::seat::seat_slot;
use crate::client::store::GameStore;
use crate::game::cards::{has_playable_card, Card};
use crate::protocol::{PlayerId, RoomId};

/// One seat as the renderer should show it, keyed by screen slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatView {
    pub slot: usize,
    pub player_id: PlayerId,
    pub card_count: usize,
    /// Present only for the local seat (slot 0). The server leaks every
    /// hand in its snapshots; remote hands are deliberately reduced to
    /// counts here so the renderer cannot show them.
    pub cards: Option<Vec<Card>>,
    pub is_current_turn: bool,
}

/// Everything the renderer needs, derived from the store. Pure read;
/// holds no references back into it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableView {
    pub room_id: Option<RoomId>,
    /// Sorted by slot. Empty until the local player appears in the
    /// seating order; without a local seat there is no relative layout.
    pub seats: Vec<SeatView>,
    pub top_card: Option<Card>,
    pub my_turn: bool,
    /// Draw affordance: it is my turn and nothing in my hand is playable.
    pub can_draw: bool,
}

pub fn project(store: &GameStore) -> TableView {
    let my_turn = store.is_my_turn();
    let mut seats = Vec::new();
    if let Some(my_id) = store.my_id() {
        for (index, player_id) in store.players().iter().enumerate() {
            let Some(slot) = seat_slot(store.players(), my_id, index) else {
                break;
            };
            let hand = store.hand_of(player_id);
            seats.push(SeatView {
                slot,
                player_id: player_id.clone(),
                card_count: hand.len(),
                cards: (slot == 0).then(|| hand.to_vec()),
                is_current_turn: store.started() && index == store.turn_index(),
            });
        }
    }
    seats.sort_by_key(|seat| seat.slot);
    TableView {
        room_id: store.room_id().map(str::to_string),
        seats,
        top_card: store.current_card().copied(),
        my_turn,
        can_draw: my_turn && !has_playable_card(store.my_hand(), store.current_card()),
    }
}
