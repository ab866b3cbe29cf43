//! # cardsim
//!
//! A turn-based, multi-player card game simulator.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic Engine**: the simulator only knows the
//!    `State` / `Move` / `RuleSet` / `Tactic` contract. New games and
//!    strategies plug in at that seam.
//!
//! 2. **Clone-On-Transition**: `do_move` never mutates its input. Every
//!    transition returns an independent copy, so states can be replayed,
//!    inspected, or branched without aliasing bugs.
//!
//! 3. **Deterministic Randomness**: the shuffle is the only source of
//!    non-determinism and flows through a seeded, forkable RNG, making
//!    single games and whole batches reproducible.
//!
//! ## Modules
//!
//! - `cards`: card and pile primitives shared by every game
//! - `core`: player identity, per-player storage, errors, RNG
//! - `rules`: the polymorphic game contract and generic tactics
//! - `games`: concrete rule sets (monster combat, trick-discard)
//! - `sim`: single-game and batch simulation

pub mod cards;
pub mod core;
pub mod games;
pub mod rules;
pub mod sim;

// Re-export commonly used types
pub use crate::cards::{standard_deck, Card, Pile, Suit};
pub use crate::core::{GameError, GameRng, PlayerId, PlayerMap};
pub use crate::rules::{Move, RandomTactic, RuleSet, State, Tactic};
pub use crate::sim::{BatchStats, GameOutcome, Simulator};
