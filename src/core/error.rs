//! Error types for pile operations and the simulation contract.
//!
//! All variants are fatal: they signal a bug in a `RuleSet` or `Tactic`
//! implementation, not a recoverable runtime condition. The simulation
//! engine propagates them and aborts the current run (and, in a batch,
//! the whole batch).

use thiserror::Error;

/// A fatal contract violation inside a rule set, tactic, or pile operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Pop was called on an empty pile.
    ///
    /// Well-formed rule sets check `is_game_over` (or pile emptiness)
    /// before popping; hitting this means they didn't.
    #[error("cannot pop from an empty pile")]
    EmptyPile,

    /// More cards were requested than the pile holds.
    #[error("requested {requested} cards but the pile holds {available}")]
    InsufficientCards { requested: usize, available: usize },

    /// A move was applied that the rule set did not offer, or a tactic
    /// returned a move absent from the offered list.
    #[error("illegal move: {0}")]
    IllegalMove(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(GameError::EmptyPile.to_string(), "cannot pop from an empty pile");
        assert_eq!(
            GameError::InsufficientCards { requested: 5, available: 2 }.to_string(),
            "requested 5 cards but the pile holds 2"
        );
        assert_eq!(
            GameError::IllegalMove("draw".to_string()).to_string(),
            "illegal move: draw"
        );
    }
}
