//! Ordered card container.
//!
//! A `Pile` is the shared substrate for draw stacks, hands, lives pools,
//! monster groupings, and trophy piles. It is LIFO-biased: `push` appends
//! at the tail, `pop` and `top` work at the tail.
//!
//! Cards are immutable values, so `Clone` is a full value copy and clones
//! never alias each other.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{GameError, GameRng};

use super::Card;

/// A mutable ordered sequence of cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    cards: Vec<Card>,
}

impl Pile {
    /// Create an empty pile.
    #[must_use]
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Number of cards in the pile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the pile holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Append a card at the tail.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Append every card of `other` at the tail, preserving order.
    pub fn push_all(&mut self, other: Pile) {
        self.cards.extend(other.cards);
    }

    /// Remove and return the tail card.
    pub fn pop(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyPile)
    }

    /// Remove the last `n` cards into a new pile, preserving their
    /// relative order.
    ///
    /// Fails with `InsufficientCards` when `n` exceeds the pile size
    /// (requests are never clamped).
    pub fn pop_many(&mut self, n: usize) -> Result<Pile, GameError> {
        if n > self.cards.len() {
            return Err(GameError::InsufficientCards {
                requested: n,
                available: self.cards.len(),
            });
        }
        let cards = self.cards.split_off(self.cards.len() - n);
        Ok(Pile { cards })
    }

    /// Remove every card structurally equal to `card`.
    ///
    /// In a single standard deck no two cards compare equal, so this
    /// degenerates to single-removal in practice.
    pub fn remove(&mut self, card: Card) {
        self.cards.retain(|&c| c != card);
    }

    /// Read the tail card without removing it.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// Whether the pile contains a card structurally equal to `card`.
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Iterate over the cards, bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// The cards as a slice, bottom to top.
    #[must_use]
    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Shuffle the pile in place (uniform permutation).
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Enumerate every non-empty subset of the pile as a new pile:
    /// 2^n - 1 results for n cards, duplicate-free by subset, enumeration
    /// order unspecified.
    ///
    /// Cost is exponential in the pile size. Move generation only calls
    /// this on hand-sized piles (a handful of cards); do not call it on
    /// a draw stack.
    #[must_use]
    pub fn combinations(&self) -> Vec<Pile> {
        let n = self.cards.len();
        assert!(n <= 20, "combinations() is exponential, pile too large: {n}");

        let mut subsets = Vec::with_capacity((1usize << n) - 1);
        for mask in 1usize..(1usize << n) {
            let cards = self
                .cards
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, &card)| card)
                .collect();
            subsets.push(Pile { cards });
        }
        subsets
    }
}

impl FromIterator<Card> for Pile {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Pile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
        }
        write!(f, "]")
    }
}
