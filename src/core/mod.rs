//! Core building blocks: player identity, per-player storage, errors, RNG.

mod error;
mod player;
mod rng;

pub use error::GameError;
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
