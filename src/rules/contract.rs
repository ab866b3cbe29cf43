//! The polymorphic game contract.
//!
//! Four roles, implemented once per game:
//! - `State`: a self-describing, copyable snapshot of one game
//! - `Move`: a self-describing action
//! - `RuleSet`: start state, legal moves, transitions, termination, winners
//! - `Tactic`: a decision policy picking one move from an offered list
//!
//! Move and state shapes are closed per rule set, so they are associated
//! types on `RuleSet` rather than trait objects.

use std::fmt;

use crate::core::{GameError, GameRng, PlayerId};

/// A snapshot of one game in progress.
///
/// States are plain values: `Clone` must produce a fully independent
/// copy, and nothing in a state may alias another state. The engine and
/// rule sets rely on this to replay, inspect, or branch games safely.
pub trait State: Clone + fmt::Display {
    /// Number of players in this game.
    fn player_count(&self) -> usize;

    /// The player whose turn it is.
    fn current_player(&self) -> PlayerId;
}

/// One action a player can take.
///
/// Opaque to the engine beyond equality (used to verify a tactic's
/// choice was actually offered) and rendering.
pub trait Move: Clone + PartialEq + fmt::Display {}

/// The rules of one game.
pub trait RuleSet {
    type State: State;
    type Move: Move;

    /// Build a fresh start state for `player_count` players.
    ///
    /// The rule set owns the handed-in RNG for the whole game; all
    /// shuffling flows through it, so a game is replayable from the
    /// RNG's seed.
    fn make_start_state(&self, player_count: usize, rng: GameRng) -> Self::State;

    /// Enumerate the current player's legal moves, in a stable order.
    ///
    /// Must return at least one move whenever `is_game_over` is false;
    /// an empty list before game over is a contract violation.
    fn list_moves(&self, state: &Self::State) -> Vec<Self::Move>;

    /// Apply one legal move, returning the successor state.
    ///
    /// The input state is never mutated: the successor is an independent
    /// copy with the move applied and `current_player` advanced
    /// round-robin. Fails when handed a move this rule set did not
    /// generate for `state`.
    fn do_move(&self, state: &Self::State, mv: &Self::Move) -> Result<Self::State, GameError>;

    /// Whether the game has ended.
    fn is_game_over(&self, state: &Self::State) -> bool;

    /// The winning players. Called only once `is_game_over` holds;
    /// ties are expressed by returning more than one player.
    fn list_winners(&self, state: &Self::State) -> Vec<PlayerId>;
}

/// A decision policy: pick exactly one move from the offered list.
///
/// The engine verifies the returned move is present in `moves` and
/// aborts the run with `IllegalMove` if it is not. `moves` is never
/// empty (the engine checks game over and the non-empty-moves contract
/// first).
pub trait Tactic<R: RuleSet> {
    fn choose_move(&mut self, state: &R::State, moves: &[R::Move]) -> R::Move;
}
