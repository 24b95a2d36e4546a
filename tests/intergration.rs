//! Replays a full scripted session through the store and the projection,
//! the way the event loop would: one JSON line at a time, no network.

use uno_tres::client::{project, GameStore, IntentError, Phase};
use uno_tres::game::cards::{Card, Color, Rank};
use uno_tres::protocol::{ClientIntent, ServerEvent};

fn feed(store: &mut GameStore, line: &str) {
    let event: ServerEvent = serde_json::from_str(line).expect("script line should parse");
    store.apply(event);
}

#[test]
fn test_scripted_session() {
    let mut store = GameStore::new();

    feed(&mut store, r#"{"type":"connected","data":{"playerId":"me1"}}"#);
    assert_eq!(store.my_id(), Some("me1"));
    assert_eq!(store.phase(), Phase::Idle);

    // Nothing sendable before a room exists.
    assert_eq!(store.draw_card(), Err(IntentError::NoRoom));

    // Join a room another player created.
    let intent = store.join_room("qk7").unwrap();
    assert_eq!(intent, ClientIntent::JoinRoom("QK7".into()));
    assert_eq!(store.phase(), Phase::RoomPending);

    feed(
        &mut store,
        r#"{"type":"playerList","data":{"players":["host1","me1"],"roomId":"QK7"}}"#,
    );
    assert_eq!(store.phase(), Phase::RoomJoined);

    feed(
        &mut store,
        r#"{"type":"gameStarted","data":{
            "hands":{"host1":["G1","Y9"],"me1":["R5","B5"]},
            "currentCard":"G7",
            "turnIndex":1}}"#,
    );
    assert!(store.started());
    assert!(store.is_my_turn());

    // R5/B5 on G7: no playable card, so the view offers a draw.
    let view = project(&store);
    assert!(view.can_draw);
    assert_eq!(view.top_card, Some(Card::Colored(Color::Green, Rank::Seven)));
    assert_eq!(
        store.draw_card(),
        Ok(ClientIntent::DrawCard {
            room_id: "QK7".into()
        })
    );

    // The draw comes back player-scoped; the host's hand is untouched.
    feed(&mut store, r#"{"type":"cardDrawn","data":["R5","B5","G2"]}"#);
    assert_eq!(
        store.my_hand(),
        [
            Card::Colored(Color::Red, Rank::Five),
            Card::Colored(Color::Blue, Rank::Five),
            Card::Colored(Color::Green, Rank::Two),
        ]
    );
    assert_eq!(
        store.hand_of("host1"),
        [
            Card::Colored(Color::Green, Rank::One),
            Card::Colored(Color::Yellow, Rank::Nine),
        ]
    );

    // Now G2 is playable and the draw affordance goes away.
    let view = project(&store);
    assert!(view.my_turn);
    assert!(!view.can_draw);
    let play = store.play_card(Card::Colored(Color::Green, Rank::Two)).unwrap();
    assert_eq!(
        play,
        ClientIntent::PlayCard {
            room_id: "QK7".into(),
            card: Card::Colored(Color::Green, Rank::Two),
        }
    );

    // Server acknowledges with a full snapshot handing the turn over.
    feed(
        &mut store,
        r#"{"type":"gameStateUpdate","data":{
            "hands":{"host1":["G1","Y9"],"me1":["R5","B5"]},
            "currentCard":"G2",
            "turnIndex":0}}"#,
    );
    assert!(!store.is_my_turn());
    assert_eq!(
        store.play_card(Card::Colored(Color::Red, Rank::Five)),
        Err(IntentError::NotYourTurn)
    );

    // A rejection from the server changes nothing.
    let before = store.clone();
    feed(&mut store, r#"{"type":"errorMessage","data":"Not your turn"}"#);
    assert_eq!(store.my_hand(), before.my_hand());
    assert_eq!(store.turn_index(), before.turn_index());

    // Seat layout stays centered on the local player throughout.
    let view = project(&store);
    let slots: Vec<(usize, &str)> = view
        .seats
        .iter()
        .map(|s| (s.slot, s.player_id.as_str()))
        .collect();
    assert_eq!(slots, vec![(0, "me1"), (1, "host1")]);
}
