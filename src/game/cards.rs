use std::fmt::Display;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A single UNO card. Cards are plain values compared structurally;
/// two players may hold "equal" cards at the same time.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Card {
    Colored(Color, Rank),
    Wild(WildKind),
}

impl Card {
    pub fn color(&self) -> Option<Color> {
        match self {
            Card::Colored(color, _) => Some(*color),
            Card::Wild(_) => None,
        }
    }

    pub fn rank(&self) -> Option<Rank> {
        match self {
            Card::Colored(_, rank) => Some(*rank),
            Card::Wild(_) => None,
        }
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, Card::Wild(_))
    }
}

/// `true` when at least one card in `hand` could be played on `current`.
///
/// Advisory only: the server is the authority on legality and may still
/// reject a play. The UI uses this to decide whether to offer a draw.
pub fn has_playable_card(hand: &[Card], current: Option<&Card>) -> bool {
    let Some(current) = current else {
        return false;
    };
    if hand.is_empty() {
        return false;
    }
    if current.is_wild() {
        // After a wild anything goes; color choice is the server's business.
        return true;
    }
    hand.iter().any(|card| matches_current(card, current))
}

/// `true` when `card` may be played on a non-absent `current` card.
pub fn matches_current(card: &Card, current: &Card) -> bool {
    if card.is_wild() || current.is_wild() {
        return true;
    }
    shares_color(card, current) || shares_rank(card, current)
}

fn shares_color(card: &Card, other: &Card) -> bool {
    match (card.color(), other.color()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn shares_rank(card: &Card, other: &Card) -> bool {
    match (card.rank(), other.rank()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
}

impl Color {
    pub fn code(&self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
        }
    }

    pub fn from_code(c: char) -> Option<Color> {
        match c {
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'B' => Some(Color::Blue),
            'Y' => Some(Color::Yellow),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Rank {
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Skip,
    Reverse,
    Draw2,
}

impl Rank {
    pub fn from_u8(val: u8) -> Option<Rank> {
        match val {
            0 => Some(Rank::Zero),
            1 => Some(Rank::One),
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Rank::Zero => "0",
            Rank::One => "1",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Skip => "Skip",
            Rank::Reverse => "Reverse",
            Rank::Draw2 => "Draw2",
        }
    }

    pub fn from_code(s: &str) -> Option<Rank> {
        match s {
            "Skip" => Some(Rank::Skip),
            "Reverse" => Some(Rank::Reverse),
            "Draw2" => Some(Rank::Draw2),
            _ => s
                .parse::<u8>()
                .ok()
                .filter(|_| s.len() == 1)
                .and_then(Rank::from_u8),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum WildKind {
    Wild,
    WildDraw4,
}

// Cards travel on the wire as short codes: "R5", "GSkip", "BDraw2",
// "Wild", "WildDraw4". Color prefix first, rank after.
impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Card::Colored(color, rank) => write!(f, "{}{}", color.code(), rank.code()),
            Card::Wild(WildKind::Wild) => write!(f, "Wild"),
            Card::Wild(WildKind::WildDraw4) => write!(f, "WildDraw4"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized card code: {0:?}")]
pub struct ParseCardError(pub String);

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Wild" => return Ok(Card::Wild(WildKind::Wild)),
            "WildDraw4" => return Ok(Card::Wild(WildKind::WildDraw4)),
            _ => {}
        }
        let mut chars = s.chars();
        let color = chars
            .next()
            .and_then(Color::from_code)
            .ok_or_else(|| ParseCardError(s.to_string()))?;
        let rank =
            Rank::from_code(chars.as_str()).ok_or_else(|| ParseCardError(s.to_string()))?;
        Ok(Card::Colored(color, rank))
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(de::Error::custom)
    }
}
