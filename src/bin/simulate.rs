//! Command-line entry point: run one game or a batch and print the
//! outcome. Per-turn traces are available via `RUST_LOG=trace`.

use clap::{Parser, ValueEnum};

use cardsim::games::crazy_eights::{EightsRuleSet, EightsTactic};
use cardsim::games::monster::{GreedyTactic, MonsterRuleSet};
use cardsim::{GameError, RuleSet, Simulator, Tactic};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Game {
    /// Monster combat with the greedy tactic.
    Monster,
    /// Trick-discard with the play-first tactic.
    Eights,
}

#[derive(Parser, Debug)]
#[command(about = "Simulate turn-based card games")]
struct Args {
    /// Which rule set to simulate.
    #[arg(long, value_enum, default_value = "monster")]
    game: Game,

    /// Number of players.
    #[arg(long, default_value_t = 2)]
    players: usize,

    /// Number of games; a single game prints its outcome, more print
    /// aggregate statistics.
    #[arg(long, default_value_t = 1)]
    games: usize,

    /// RNG seed for reproducible runs.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn run<R: RuleSet>(rules: R, tactic: &mut impl Tactic<R>, args: &Args) -> Result<(), GameError> {
    let mut sim = Simulator::new(rules, args.seed);

    if args.games == 1 {
        let outcome = sim.simulate_one(args.players, tactic)?;
        let winners: Vec<String> = outcome.winners.iter().map(ToString::to_string).collect();
        println!(
            "winners after {} turns: {}",
            outcome.turns,
            winners.join(", ")
        );
    } else {
        let stats = sim.simulate_many(args.games, args.players, tactic)?;
        print!("{stats}");
    }

    Ok(())
}

fn main() -> Result<(), GameError> {
    env_logger::init();
    let args = Args::parse();

    match args.game {
        Game::Monster => run(MonsterRuleSet, &mut GreedyTactic, &args),
        Game::Eights => run(EightsRuleSet, &mut EightsTactic, &args),
    }
}
