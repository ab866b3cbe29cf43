//! The monster combat game.
//!
//! Each player holds a hand, a pool of life cards, a row of placed
//! monsters, and a trophy pile of defeated ones. A monster is one head
//! card (rank 10 or above) plus same-suit body cards (rank below 10);
//! its strength is the sum of its body ranks. On a turn a player draws,
//! places a monster assembled from hand cards, attacks an opposing
//! monster of different strength, or attacks the lives of an opponent
//! with no monsters on the table.
//!
//! The game ends when the shared draw pile or any lives pool runs out;
//! surviving players are scored by trophy count.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::{standard_deck, Card, Pile};
use crate::core::{GameError, GameRng, PlayerId, PlayerMap};
use crate::rules::{Move, RuleSet, State, Tactic};

/// Cards dealt to each player's lives pool at the start.
pub const LIVES_DEALT: usize = 5;

/// Cards dealt to each player's hand at the start.
pub const HAND_DEALT: usize = 5;

/// Lowest rank that can head a monster; lower ranks are body cards.
pub const HEAD_RANK: u8 = 10;

/// A placed monster: one head card plus same-suit body cards.
///
/// The container is a plain `Pile`; the head/body split is computed from
/// ranks, not stored. The same-suit and exactly-one-head invariants are
/// enforced at construction, which only move generation (and tests)
/// performs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    cards: Pile,
}

impl Monster {
    /// Assemble a monster from a head card and body cards.
    ///
    /// Panics if `head` cannot head a monster or any body card is
    /// head-ranked or off-suit.
    #[must_use]
    pub fn new(head: Card, body: Pile) -> Self {
        assert!(head.rank >= HEAD_RANK, "monster head must have rank >= {HEAD_RANK}");
        assert!(
            body.iter().all(|c| c.rank < HEAD_RANK && c.suit == head.suit),
            "monster body cards must share the head's suit and have rank < {HEAD_RANK}"
        );
        let mut cards = body;
        cards.push(head);
        Self { cards }
    }

    /// The head card.
    #[must_use]
    pub fn head(&self) -> Card {
        self.cards
            .iter()
            .find(|c| c.rank >= HEAD_RANK)
            .copied()
            .expect("a monster always has a head card")
    }

    /// The body cards.
    pub fn body(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.rank < HEAD_RANK)
    }

    /// Combat strength: the sum of body-card ranks.
    #[must_use]
    pub fn strength(&self) -> u32 {
        self.body().map(|c| u32::from(c.rank)).sum()
    }

    /// Total cards in the monster (head included).
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// All of the monster's cards.
    #[must_use]
    pub fn cards(&self) -> &Pile {
        &self.cards
    }

    /// Dissolve the monster back into a plain pile of cards.
    #[must_use]
    pub fn into_pile(self) -> Pile {
        self.cards
    }
}

impl fmt::Display for Monster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.head())?;
        for card in self.body() {
            write!(f, " {}", card.rank)?;
        }
        write!(f, ")")
    }
}

/// One legal action in the monster game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MonsterMove {
    /// Draw the top card of the shared draw pile.
    Draw,
    /// Place a monster assembled from hand cards.
    Place(Monster),
    /// Send own monster `attacker` against `target_player`'s monster
    /// `target` (indices into the respective monster rows).
    AttackMonster {
        attacker: usize,
        target_player: PlayerId,
        target: usize,
    },
    /// Steal a life card from a player with no monsters on the table.
    AttackLives { target_player: PlayerId },
}

impl Move for MonsterMove {}

impl fmt::Display for MonsterMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonsterMove::Draw => write!(f, "draw"),
            MonsterMove::Place(monster) => write!(f, "place {monster}"),
            MonsterMove::AttackMonster { attacker, target_player, target } => {
                write!(f, "attack monster {target} of {target_player} with monster {attacker}")
            }
            MonsterMove::AttackLives { target_player } => {
                write!(f, "attack lives of {target_player}")
            }
        }
    }
}

/// Snapshot of one monster game.
///
/// Every card of the 52-card deck lives in exactly one container at all
/// times: the draw pile, a hand, a lives pool, a placed monster, or a
/// trophy pile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonsterState {
    current_player: PlayerId,
    draw_pile: Pile,
    hands: PlayerMap<Pile>,
    lives: PlayerMap<Pile>,
    monsters: PlayerMap<Vec<Monster>>,
    trophies: PlayerMap<Pile>,
}

impl MonsterState {
    /// Assemble a state from its containers (used by the rule set and by
    /// scenario tests). All per-player maps must agree on player count.
    #[must_use]
    pub fn new(
        current_player: PlayerId,
        draw_pile: Pile,
        hands: PlayerMap<Pile>,
        lives: PlayerMap<Pile>,
        monsters: PlayerMap<Vec<Monster>>,
        trophies: PlayerMap<Pile>,
    ) -> Self {
        let n = hands.player_count();
        assert!(lives.player_count() == n && monsters.player_count() == n && trophies.player_count() == n,
            "per-player maps disagree on player count");
        assert!(current_player.index() < n, "current player out of range");
        Self { current_player, draw_pile, hands, lives, monsters, trophies }
    }

    /// The shared draw pile.
    #[must_use]
    pub fn draw_pile(&self) -> &Pile {
        &self.draw_pile
    }

    /// A player's hand.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Pile {
        &self.hands[player]
    }

    /// A player's lives pool.
    #[must_use]
    pub fn lives(&self, player: PlayerId) -> &Pile {
        &self.lives[player]
    }

    /// A player's placed monsters.
    #[must_use]
    pub fn monsters(&self, player: PlayerId) -> &[Monster] {
        &self.monsters[player]
    }

    /// A player's trophy pile of defeated monsters.
    #[must_use]
    pub fn trophies(&self, player: PlayerId) -> &Pile {
        &self.trophies[player]
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count())
    }

    /// Total cards across every container. Stays 52 for the lifetime of
    /// a game (the card-conservation invariant).
    #[must_use]
    pub fn card_count(&self) -> usize {
        let per_player: usize = self
            .player_ids()
            .map(|p| {
                self.hands[p].len()
                    + self.lives[p].len()
                    + self.trophies[p].len()
                    + self.monsters[p].iter().map(Monster::card_count).sum::<usize>()
            })
            .sum();
        self.draw_pile.len() + per_player
    }
}

impl State for MonsterState {
    fn player_count(&self) -> usize {
        self.hands.player_count()
    }

    fn current_player(&self) -> PlayerId {
        self.current_player
    }
}

impl fmt::Display for MonsterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "current: {}", self.current_player)?;
        writeln!(f, "draw pile: {} cards", self.draw_pile.len())?;
        for player in self.player_ids() {
            write!(
                f,
                "{player}: hand {} lives {} trophies {} monsters [",
                self.hands[player],
                self.lives[player].len(),
                self.trophies[player].len(),
            )?;
            for (i, monster) in self.monsters[player].iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{monster}")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

/// Rules of the monster game.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonsterRuleSet;

impl MonsterRuleSet {
    fn check(&self, state: &MonsterState, mv: &MonsterMove) -> Result<(), GameError> {
        let me = state.current_player;
        let illegal = || GameError::IllegalMove(mv.to_string());

        match mv {
            MonsterMove::Draw => Ok(()),
            MonsterMove::Place(monster) => {
                if monster.cards().iter().all(|&c| state.hands[me].contains(c)) {
                    Ok(())
                } else {
                    Err(illegal())
                }
            }
            MonsterMove::AttackMonster { attacker, target_player, target } => {
                if *target_player == me || target_player.index() >= state.player_count() {
                    return Err(illegal());
                }
                let mine = state.monsters[me].get(*attacker).ok_or_else(illegal)?;
                let theirs = state.monsters[*target_player].get(*target).ok_or_else(illegal)?;
                // Equal-strength matchups are never generated.
                if mine.strength() == theirs.strength() {
                    return Err(illegal());
                }
                Ok(())
            }
            MonsterMove::AttackLives { target_player } => {
                if *target_player == me
                    || target_player.index() >= state.player_count()
                    || state.monsters[me].is_empty()
                    || !state.monsters[*target_player].is_empty()
                {
                    return Err(illegal());
                }
                Ok(())
            }
        }
    }
}

impl RuleSet for MonsterRuleSet {
    type State = MonsterState;
    type Move = MonsterMove;

    /// Shuffle a standard deck, deal each player 5 lives then 5 hand
    /// cards, leave the rest as the shared draw pile.
    fn make_start_state(&self, player_count: usize, mut rng: GameRng) -> MonsterState {
        assert!(
            (2..=5).contains(&player_count),
            "monster game supports 2-5 players, got {player_count}"
        );

        let mut draw_pile = standard_deck();
        draw_pile.shuffle(&mut rng);

        let mut hands = Vec::with_capacity(player_count);
        let mut lives = Vec::with_capacity(player_count);
        for _ in 0..player_count {
            lives.push(
                draw_pile
                    .pop_many(LIVES_DEALT)
                    .expect("52 cards cover the deal for at most 5 players"),
            );
            hands.push(
                draw_pile
                    .pop_many(HAND_DEALT)
                    .expect("52 cards cover the deal for at most 5 players"),
            );
        }

        MonsterState::new(
            PlayerId::new(0),
            draw_pile,
            hands.into(),
            lives.into(),
            PlayerMap::with_default(player_count),
            PlayerMap::with_default(player_count),
        )
    }

    fn list_moves(&self, state: &MonsterState) -> Vec<MonsterMove> {
        let mut moves = vec![MonsterMove::Draw];
        let me = state.current_player;
        let hand = &state.hands[me];

        // Placements: every head card combined with every non-empty
        // subset of same-suit body cards. A head with no matching body
        // cards yields nothing; a head alone cannot be placed.
        for &head in hand.iter().filter(|c| c.rank >= HEAD_RANK) {
            let matching: Pile = hand
                .iter()
                .filter(|c| c.rank < HEAD_RANK && c.suit == head.suit)
                .copied()
                .collect();
            if matching.is_empty() {
                continue;
            }
            for body in matching.combinations() {
                moves.push(MonsterMove::Place(Monster::new(head, body)));
            }
        }

        let my_monsters = &state.monsters[me];
        if !my_monsters.is_empty() {
            // Attacks on opposing monsters, equal strengths excluded.
            for (attacker, mine) in my_monsters.iter().enumerate() {
                for other in state.player_ids().filter(|&p| p != me) {
                    for (target, theirs) in state.monsters[other].iter().enumerate() {
                        if mine.strength() != theirs.strength() {
                            moves.push(MonsterMove::AttackMonster {
                                attacker,
                                target_player: other,
                                target,
                            });
                        }
                    }
                }
            }

            // Lives attacks against undefended opponents.
            for other in state.player_ids().filter(|&p| p != me) {
                if state.monsters[other].is_empty() {
                    moves.push(MonsterMove::AttackLives { target_player: other });
                }
            }
        }

        moves
    }

    fn do_move(&self, state: &MonsterState, mv: &MonsterMove) -> Result<MonsterState, GameError> {
        self.check(state, mv)?;

        let mut next = state.clone();
        let me = next.current_player;

        match mv {
            MonsterMove::Draw => {
                let card = next.draw_pile.pop()?;
                next.hands[me].push(card);
            }
            MonsterMove::Place(monster) => {
                for &card in monster.cards().iter() {
                    next.hands[me].remove(card);
                }
                next.monsters[me].push(monster.clone());
            }
            MonsterMove::AttackMonster { attacker, target_player, target } => {
                // Both monsters leave the table no matter who wins.
                let mine = next.monsters[me].remove(*attacker);
                let theirs = next.monsters[*target_player].remove(*target);

                let winner = if mine.strength() > theirs.strength() {
                    me
                } else {
                    *target_player
                };
                next.trophies[winner].push_all(mine.into_pile());
                next.trophies[winner].push_all(theirs.into_pile());
            }
            MonsterMove::AttackLives { target_player } => {
                let card = next.lives[*target_player].pop()?;
                next.hands[me].push(card);
            }
        }

        next.current_player = me.next(next.player_count());
        debug_assert_eq!(next.card_count(), state.card_count(), "card conservation violated");

        Ok(next)
    }

    fn is_game_over(&self, state: &MonsterState) -> bool {
        state.draw_pile.is_empty() || state.player_ids().any(|p| state.lives[p].is_empty())
    }

    /// Survivors (players with lives left) tied for the most trophies.
    ///
    /// When every lives pool is empty at once, no player survives; all
    /// players become score-eligible so the winner set is never empty.
    fn list_winners(&self, state: &MonsterState) -> Vec<PlayerId> {
        let mut eligible: Vec<PlayerId> = state
            .player_ids()
            .filter(|&p| !state.lives[p].is_empty())
            .collect();
        if eligible.is_empty() {
            eligible = state.player_ids().collect();
        }

        let best = eligible
            .iter()
            .map(|&p| state.trophies[p].len())
            .max()
            .unwrap_or(0);

        eligible
            .into_iter()
            .filter(|&p| state.trophies[p].len() == best)
            .collect()
    }
}

/// Rank used by [`GreedyTactic`] for a lives attack; dominates any
/// realistic placement or combat score.
const ATTACK_LIVES_RANK: i64 = 1000;

/// One-shot greedy heuristic for the monster game.
///
/// Prefers guaranteed lives damage over winning combat over building
/// stronger monsters over drawing; a losing attack ranks below a draw
/// and is only picked when nothing else is offered.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyTactic;

impl GreedyTactic {
    fn rank(state: &MonsterState, mv: &MonsterMove) -> i64 {
        match mv {
            MonsterMove::Draw => 0,
            MonsterMove::Place(monster) => i64::from(monster.strength()),
            MonsterMove::AttackLives { .. } => ATTACK_LIVES_RANK,
            MonsterMove::AttackMonster { attacker, target_player, target } => {
                let mine = &state.monsters(state.current_player())[*attacker];
                let theirs = &state.monsters(*target_player)[*target];
                let total = (mine.card_count() + theirs.card_count()) as i64;
                if mine.strength() > theirs.strength() {
                    100 + total
                } else {
                    -(100 + total)
                }
            }
        }
    }
}

impl Tactic<MonsterRuleSet> for GreedyTactic {
    fn choose_move(&mut self, state: &MonsterState, moves: &[MonsterMove]) -> MonsterMove {
        moves
            .iter()
            .max_by_key(|mv| Self::rank(state, mv))
            .cloned()
            .expect("rule set offered at least one move")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    fn card(suit: Suit, rank: u8) -> Card {
        Card::new(suit, rank)
    }

    fn monster(head_rank: u8, suit: Suit, body_ranks: &[u8]) -> Monster {
        let body: Pile = body_ranks.iter().map(|&r| card(suit, r)).collect();
        Monster::new(card(suit, head_rank), body)
    }

    #[test]
    fn test_monster_head_body_strength() {
        let m = monster(13, Suit::Spades, &[3, 5]);

        assert_eq!(m.head(), card(Suit::Spades, 13));
        assert_eq!(m.body().count(), 2);
        assert_eq!(m.strength(), 8);
        assert_eq!(m.card_count(), 3);
    }

    #[test]
    fn test_monster_with_empty_body() {
        let m = Monster::new(card(Suit::Hearts, 10), Pile::new());
        assert_eq!(m.strength(), 0);
        assert_eq!(m.card_count(), 1);
    }

    #[test]
    #[should_panic(expected = "monster head must have rank")]
    fn test_monster_rejects_low_head() {
        let _ = monster(9, Suit::Hearts, &[2]);
    }

    #[test]
    #[should_panic(expected = "share the head's suit")]
    fn test_monster_rejects_off_suit_body() {
        let body: Pile = [card(Suit::Clubs, 4)].into_iter().collect();
        let _ = Monster::new(card(Suit::Hearts, 12), body);
    }

    #[test]
    fn test_monster_display() {
        assert_eq!(monster(13, Suit::Spades, &[3, 5]).to_string(), "(K♠ 3 5)");
    }

    #[test]
    fn test_move_display() {
        assert_eq!(MonsterMove::Draw.to_string(), "draw");
        assert_eq!(
            MonsterMove::Place(monster(11, Suit::Hearts, &[2])).to_string(),
            "place (J♥ 2)"
        );
        assert_eq!(
            MonsterMove::AttackMonster {
                attacker: 1,
                target_player: PlayerId::new(2),
                target: 0
            }
            .to_string(),
            "attack monster 0 of player 2 with monster 1"
        );
        assert_eq!(
            MonsterMove::AttackLives { target_player: PlayerId::new(1) }.to_string(),
            "attack lives of player 1"
        );
    }

    #[test]
    fn test_start_state_deal() {
        let state = MonsterRuleSet.make_start_state(3, GameRng::new(7));

        assert_eq!(state.player_count(), 3);
        assert_eq!(state.current_player(), PlayerId::new(0));
        assert_eq!(state.draw_pile().len(), 52 - 3 * (LIVES_DEALT + HAND_DEALT));
        for p in state.player_ids() {
            assert_eq!(state.hand(p).len(), HAND_DEALT);
            assert_eq!(state.lives(p).len(), LIVES_DEALT);
            assert!(state.monsters(p).is_empty());
            assert!(state.trophies(p).is_empty());
        }
        assert_eq!(state.card_count(), 52);
    }

    #[test]
    #[should_panic(expected = "monster game supports 2-5 players")]
    fn test_start_state_rejects_bad_player_count() {
        let _ = MonsterRuleSet.make_start_state(6, GameRng::new(0));
    }

    #[test]
    fn test_greedy_prefers_lives_attack() {
        let mut tactic = GreedyTactic;
        let state = state_with_monsters();

        let moves = vec![
            MonsterMove::Draw,
            MonsterMove::Place(monster(12, Suit::Hearts, &[7])),
            MonsterMove::AttackLives { target_player: PlayerId::new(1) },
        ];
        let chosen = tactic.choose_move(&state, &moves);
        assert_eq!(chosen, MonsterMove::AttackLives { target_player: PlayerId::new(1) });
    }

    #[test]
    fn test_greedy_avoids_losing_attack() {
        let mut tactic = GreedyTactic;
        let state = state_with_monsters();

        // Own monster (strength 2) loses to the opponent's (strength 9):
        // the attack ranks below even a draw.
        let losing = MonsterMove::AttackMonster {
            attacker: 0,
            target_player: PlayerId::new(2),
            target: 0,
        };
        let chosen = tactic.choose_move(&state, &[MonsterMove::Draw, losing.clone()]);
        assert_eq!(chosen, MonsterMove::Draw);

        // Unless it is the only option.
        let chosen = tactic.choose_move(&state, std::slice::from_ref(&losing));
        assert_eq!(chosen, losing);
    }

    /// Three players; player 0 has a weak monster, player 1 none,
    /// player 2 a strong one. Cards are drawn from distinct deck slots
    /// so conservation-style checks stay meaningful.
    fn state_with_monsters() -> MonsterState {
        let hands = PlayerMap::with_default(3);
        let mut lives: PlayerMap<Pile> = PlayerMap::with_default(3);
        for p in PlayerId::all(3) {
            lives[p].push(card(Suit::Diamonds, 1 + p.0));
        }

        let mut monsters: PlayerMap<Vec<Monster>> = PlayerMap::with_default(3);
        monsters[PlayerId::new(0)].push(monster(10, Suit::Clubs, &[2]));
        monsters[PlayerId::new(2)].push(monster(13, Suit::Spades, &[4, 5]));

        let mut draw_pile = Pile::new();
        draw_pile.push(card(Suit::Hearts, 9));

        MonsterState::new(
            PlayerId::new(0),
            draw_pile,
            hands,
            lives,
            monsters,
            PlayerMap::with_default(3),
        )
    }
}
