//! Simulation engine: drives games to completion and aggregates
//! statistics over batches.
//!
//! One game is a tight loop: list moves, let the tactic pick one, apply
//! it, repeat until the rule set reports game over. The engine enforces
//! the contract at the seams: a tactic returning a move that was not
//! offered, or a rule set offering no moves before game over, aborts
//! the run with `IllegalMove`. No turn limit is imposed; termination is
//! the rule set's obligation.
//!
//! Batches fork one RNG per game from the engine's seed, so a whole
//! batch is reproducible from a single number.

use serde::Serialize;
use std::fmt;

use crate::core::{GameError, GameRng, PlayerId, PlayerMap};
use crate::rules::{RuleSet, State, Tactic};

/// Result of one completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    /// Number of moves applied before the game ended.
    pub turns: u32,
    /// The winning players; more than one on a tie.
    pub winners: Vec<PlayerId>,
}

/// Aggregate statistics over a batch of games.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BatchStats {
    /// Number of games played.
    pub games: usize,
    /// Mean turn count per game.
    pub mean_turns: f64,
    /// Population standard deviation of turn counts.
    pub turn_stddev: f64,
    /// Win count per player. A tied game credits every tied player, so
    /// the counts can exceed the number of games.
    pub wins: PlayerMap<u32>,
    /// Each player's win count divided by the total win credits.
    pub win_rates: PlayerMap<f64>,
}

impl fmt::Display for BatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} games, {:.1} turns on average (stddev {:.1})",
            self.games, self.mean_turns, self.turn_stddev
        )?;
        for (player, rate) in self.win_rates.iter() {
            writeln!(f, "{player}: {} wins ({:.1}%)", self.wins[player], rate * 100.0)?;
        }
        Ok(())
    }
}

/// Drives games of one rule set to completion.
pub struct Simulator<R: RuleSet> {
    rules: R,
    rng: GameRng,
}

impl<R: RuleSet> Simulator<R> {
    /// Create a simulator for `rules`, seeded for reproducible runs.
    #[must_use]
    pub fn new(rules: R, seed: u64) -> Self {
        Self {
            rules,
            rng: GameRng::new(seed),
        }
    }

    /// Play one game to completion, returning its turn count and
    /// winner set.
    pub fn simulate_one(
        &mut self,
        player_count: usize,
        tactic: &mut impl Tactic<R>,
    ) -> Result<GameOutcome, GameError> {
        let mut state = self.rules.make_start_state(player_count, self.rng.fork());
        let mut turns = 0u32;

        log::debug!("start state:\n{state}");

        while !self.rules.is_game_over(&state) {
            let moves = self.rules.list_moves(&state);
            if moves.is_empty() {
                return Err(GameError::IllegalMove(format!(
                    "rule set offered no moves for {} before game over",
                    state.current_player()
                )));
            }

            let chosen = tactic.choose_move(&state, &moves);
            if !moves.contains(&chosen) {
                return Err(GameError::IllegalMove(chosen.to_string()));
            }

            log::trace!("turn {turns}: {} plays {chosen}", state.current_player());
            state = self.rules.do_move(&state, &chosen)?;
            log::trace!("{state}");

            turns += 1;
        }

        let winners = self.rules.list_winners(&state);
        log::debug!("game over after {turns} turns, winners: {winners:?}");

        Ok(GameOutcome { turns, winners })
    }

    /// Play `games` independent games (fresh start state each time) and
    /// aggregate turn-count and win-rate statistics.
    ///
    /// A single failing game aborts the whole batch; there is no
    /// per-game isolation.
    pub fn simulate_many(
        &mut self,
        games: usize,
        player_count: usize,
        tactic: &mut impl Tactic<R>,
    ) -> Result<BatchStats, GameError> {
        assert!(games > 0, "a batch needs at least one game");

        let mut turn_counts = Vec::with_capacity(games);
        let mut wins: PlayerMap<u32> = PlayerMap::with_value(player_count, 0);

        for _ in 0..games {
            let outcome = self.simulate_one(player_count, tactic)?;
            turn_counts.push(f64::from(outcome.turns));
            for winner in outcome.winners {
                wins[winner] += 1;
            }
        }

        let mean_turns = turn_counts.iter().sum::<f64>() / games as f64;
        let variance = turn_counts
            .iter()
            .map(|&t| (t - mean_turns).powi(2))
            .sum::<f64>()
            / games as f64;

        let total_credits: u32 = wins.iter().map(|(_, &w)| w).sum();
        let win_rates = PlayerMap::new(player_count, |p| {
            if total_credits == 0 {
                0.0
            } else {
                f64::from(wins[p]) / f64::from(total_credits)
            }
        });

        Ok(BatchStats {
            games,
            mean_turns,
            turn_stddev: variance.sqrt(),
            wins,
            win_rates,
        })
    }
}
