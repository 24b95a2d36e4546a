use crate::protocol::PlayerId;

/// Maps an absolute seating index to a screen slot relative to the local
/// player. Slot 0 is always the local seat; slots increase toward the
/// following seats in turn order.
///
/// `None` when the local player is not (yet) in the list or the index is
/// out of range, in which case no seat-relative layout may be rendered.
/// Pure and cheap: recompute on every seating change, never cache by
/// index alone.
pub fn seat_slot(players: &[PlayerId], my_id: &str, index: usize) -> Option<usize> {
    let n = players.len();
    let my_index = players.iter().position(|p| p == my_id)?;
    if index >= n {
        return None;
    }
    Some((index + n - my_index) % n)
}
