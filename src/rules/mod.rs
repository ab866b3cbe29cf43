//! Game abstraction: the `State` / `Move` / `RuleSet` / `Tactic` contract
//! that concrete games and strategies plug into.

mod contract;
mod tactic;

pub use contract::{Move, RuleSet, State, Tactic};
pub use tactic::RandomTactic;
