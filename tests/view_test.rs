use std::collections::HashMap;

use uno_tres::client::{project, GameStore};
use uno_tres::game::cards::{Card, Color, Rank};
use uno_tres::protocol::{ServerEvent, Snapshot};

#[cfg(test)]
mod view_tests {
    use super::*;

    fn store_with_game(turn: usize, my_hand: &[Card], current: Option<Card>) -> GameStore {
        let mut store = GameStore::new();
        store.apply(ServerEvent::Connected {
            player_id: "B".into(),
        });
        store.apply(ServerEvent::PlayerList {
            players: vec!["A".into(), "B".into(), "C".into()],
            room_id: "ABC".into(),
        });
        let mut hands: HashMap<String, Vec<Card>> = HashMap::new();
        hands.insert("A".into(), vec![Card::Colored(Color::Green, Rank::One)]);
        hands.insert("B".into(), my_hand.to_vec());
        hands.insert("C".into(), vec![Card::Colored(Color::Blue, Rank::Two)]);
        store.apply(ServerEvent::GameStarted(Snapshot {
            hands,
            current_card: current,
            turn_index: turn,
        }));
        store
    }

    #[test]
    fn test_seats_rotate_around_local_player() {
        let store = store_with_game(
            0,
            &[Card::Colored(Color::Red, Rank::Five)],
            Some(Card::Colored(Color::Red, Rank::Nine)),
        );
        let view = project(&store);
        let slots: Vec<(usize, &str)> = view
            .seats
            .iter()
            .map(|s| (s.slot, s.player_id.as_str()))
            .collect();
        assert_eq!(slots, vec![(0, "B"), (1, "C"), (2, "A")]);
    }

    #[test]
    fn test_only_local_seat_shows_cards() {
        let store = store_with_game(
            0,
            &[Card::Colored(Color::Red, Rank::Five)],
            Some(Card::Colored(Color::Red, Rank::Nine)),
        );
        let view = project(&store);
        for seat in &view.seats {
            if seat.slot == 0 {
                assert_eq!(
                    seat.cards.as_deref(),
                    Some(&[Card::Colored(Color::Red, Rank::Five)][..])
                );
            } else {
                assert_eq!(seat.cards, None);
                assert_eq!(seat.card_count, 1);
            }
        }
    }

    #[test]
    fn test_turn_flag_follows_absolute_index() {
        // turn_index 2 -> player C, who sits at slot 1 for B.
        let store = store_with_game(
            2,
            &[Card::Colored(Color::Red, Rank::Five)],
            Some(Card::Colored(Color::Red, Rank::Nine)),
        );
        let view = project(&store);
        assert!(!view.my_turn);
        let current: Vec<&str> = view
            .seats
            .iter()
            .filter(|s| s.is_current_turn)
            .map(|s| s.player_id.as_str())
            .collect();
        assert_eq!(current, vec!["C"]);
    }

    #[test]
    fn test_draw_affordance_only_without_playable_card() {
        // R5/B5 against G7: nothing playable, my turn -> offer a draw.
        let stuck = store_with_game(
            1,
            &[
                Card::Colored(Color::Red, Rank::Five),
                Card::Colored(Color::Blue, Rank::Five),
            ],
            Some(Card::Colored(Color::Green, Rank::Seven)),
        );
        let view = project(&stuck);
        assert!(view.my_turn);
        assert!(view.can_draw);

        let playable = store_with_game(
            1,
            &[Card::Colored(Color::Green, Rank::Five)],
            Some(Card::Colored(Color::Green, Rank::Seven)),
        );
        assert!(!project(&playable).can_draw);

        // Not my turn: never offer a draw, playable or not.
        let waiting = store_with_game(
            0,
            &[Card::Colored(Color::Red, Rank::Five)],
            Some(Card::Colored(Color::Green, Rank::Seven)),
        );
        assert!(!project(&waiting).can_draw);
    }

    #[test]
    fn test_no_seats_before_local_player_joins() {
        let mut store = GameStore::new();
        store.apply(ServerEvent::Connected {
            player_id: "ME".into(),
        });
        store.apply(ServerEvent::PlayerList {
            players: vec!["A".into(), "B".into()],
            room_id: "ABC".into(),
        });
        let view = project(&store);
        assert!(view.seats.is_empty());
        assert!(!view.my_turn);
        assert!(!view.can_draw);
    }
}
