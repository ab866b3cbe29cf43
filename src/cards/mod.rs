//! Card and pile primitives shared by every rule set.

mod card;
mod pile;

pub use card::{standard_deck, Card, Suit};
pub use pile::Pile;
