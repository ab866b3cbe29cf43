//! Game-agnostic tactics.

use crate::core::GameRng;

use super::{RuleSet, Tactic};

/// Picks a uniformly random move from the offered list.
///
/// Works with any rule set; useful as a baseline opponent and for
/// exercising move-legality closure in tests.
#[derive(Clone, Debug)]
pub struct RandomTactic {
    rng: GameRng,
}

impl RandomTactic {
    /// Create a random tactic with its own seeded RNG.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: GameRng::new(seed) }
    }
}

impl<R: RuleSet> Tactic<R> for RandomTactic {
    fn choose_move(&mut self, _state: &R::State, moves: &[R::Move]) -> R::Move {
        self.rng
            .choose(moves)
            .expect("rule set offered at least one move")
            .clone()
    }
}
