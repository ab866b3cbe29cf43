//! Standard playing cards.
//!
//! A `Card` is an immutable (suit, rank) pair with structural equality.
//! The `matches` relation (same suit OR same rank) drives discard/draw
//! legality in the trick-discard game.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Pile;

/// One of the four French suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All four suits, in deck-building order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// The suit's display symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An immutable playing card.
///
/// Ranks run 1 (ace) through 13 (king). Equality is structural: two cards
/// are equal iff suit and rank are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: u8,
}

impl Card {
    /// Lowest rank (ace).
    pub const MIN_RANK: u8 = 1;
    /// Highest rank (king).
    pub const MAX_RANK: u8 = 13;

    /// Create a card. Panics if `rank` is outside 1..=13.
    #[must_use]
    pub fn new(suit: Suit, rank: u8) -> Self {
        assert!(
            (Self::MIN_RANK..=Self::MAX_RANK).contains(&rank),
            "rank must be 1..=13, got {rank}"
        );
        Self { suit, rank }
    }

    /// Whether two cards match: same suit or same rank.
    #[must_use]
    pub fn matches(self, other: Card) -> bool {
        self.suit == other.suit || self.rank == other.rank
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank {
            11 => write!(f, "J{}", self.suit),
            12 => write!(f, "Q{}", self.suit),
            13 => write!(f, "K{}", self.suit),
            r => write!(f, "{r}{}", self.suit),
        }
    }
}

/// Build the standard 52-card deck: the Cartesian product of the four
/// suits and ranks 1..=13, each card exactly once, unshuffled.
#[must_use]
pub fn standard_deck() -> Pile {
    let mut deck = Pile::new();
    for suit in Suit::ALL {
        for rank in Card::MIN_RANK..=Card::MAX_RANK {
            deck.push(Card::new(suit, rank));
        }
    }
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_card_equality_is_structural() {
        let a = Card::new(Suit::Hearts, 7);
        let b = Card::new(Suit::Hearts, 7);
        let c = Card::new(Suit::Spades, 7);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_matches_same_suit_or_rank() {
        let seven_hearts = Card::new(Suit::Hearts, 7);

        assert!(seven_hearts.matches(Card::new(Suit::Hearts, 2))); // same suit
        assert!(seven_hearts.matches(Card::new(Suit::Clubs, 7))); // same rank
        assert!(!seven_hearts.matches(Card::new(Suit::Clubs, 2)));
    }

    #[test]
    #[should_panic(expected = "rank must be 1..=13")]
    fn test_rank_out_of_range() {
        Card::new(Suit::Hearts, 14);
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::new(Suit::Hearts, 7).to_string(), "7♥");
        assert_eq!(Card::new(Suit::Spades, 10).to_string(), "10♠");
        assert_eq!(Card::new(Suit::Clubs, 11).to_string(), "J♣");
        assert_eq!(Card::new(Suit::Diamonds, 12).to_string(), "Q♦");
        assert_eq!(Card::new(Suit::Spades, 13).to_string(), "K♠");
    }

    #[test]
    fn test_standard_deck_completeness() {
        let deck = standard_deck();
        assert_eq!(deck.len(), 52);

        let unique: HashSet<_> = deck.iter().copied().collect();
        assert_eq!(unique.len(), 52);

        for suit in Suit::ALL {
            for rank in 1..=13 {
                assert!(unique.contains(&Card::new(suit, rank)));
            }
        }
    }

    #[test]
    fn test_card_serde_round_trip() {
        let card = Card::new(Suit::Diamonds, 11);
        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
