//! The draw-or-match trick-discard game.
//!
//! Players try to empty their hands onto a shared center pile. A card
//! may be played when it matches the center's top card by suit or rank;
//! otherwise the player draws up to three cards, stopping early if one
//! matches (it goes straight to the center). When the draw pile runs
//! dry it is rebuilt by shuffling the center pile, leaving the center's
//! top card in place.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::{standard_deck, Card, Pile};
use crate::core::{GameError, GameRng, PlayerId, PlayerMap};
use crate::rules::{Move, RuleSet, State, Tactic};

/// Cards dealt to each hand at the start.
pub const HAND_DEALT: usize = 5;

/// Most cards drawn on a single draw move.
const DRAW_LIMIT: usize = 3;

/// One legal action in the trick-discard game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EightsMove {
    /// Draw up to three cards, stopping early on a match.
    Draw,
    /// Discard a hand card matching the center's top card.
    Play(Card),
}

impl Move for EightsMove {}

impl fmt::Display for EightsMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EightsMove::Draw => write!(f, "draw"),
            EightsMove::Play(card) => write!(f, "play {card}"),
        }
    }
}

/// Snapshot of one trick-discard game.
///
/// Owns its RNG: the mid-game reshuffle of the center pile must stay
/// replayable, so the random stream travels with the state.
#[derive(Clone, Debug)]
pub struct EightsState {
    current_player: PlayerId,
    draw_pile: Pile,
    center_pile: Pile,
    hands: PlayerMap<Pile>,
    rng: GameRng,
}

impl EightsState {
    /// The shared draw pile.
    #[must_use]
    pub fn draw_pile(&self) -> &Pile {
        &self.draw_pile
    }

    /// The center discard pile; its top card gates play legality.
    #[must_use]
    pub fn center_pile(&self) -> &Pile {
        &self.center_pile
    }

    /// A player's hand.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Pile {
        &self.hands[player]
    }

    /// Total cards across every container; stays 52 for a whole game.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.draw_pile.len()
            + self.center_pile.len()
            + self.hands.iter().map(|(_, hand)| hand.len()).sum::<usize>()
    }

    /// Rebuild the draw pile from the center pile when it runs dry,
    /// keeping the center's top card in place.
    fn refill_draw_pile_if_needed(&mut self) -> Result<(), GameError> {
        if !self.draw_pile.is_empty() {
            return Ok(());
        }
        let top = self.center_pile.pop()?;
        self.draw_pile = std::mem::take(&mut self.center_pile);
        self.center_pile.push(top);
        self.draw_pile.shuffle(&mut self.rng);
        Ok(())
    }
}

impl State for EightsState {
    fn player_count(&self) -> usize {
        self.hands.player_count()
    }

    fn current_player(&self) -> PlayerId {
        self.current_player
    }
}

impl fmt::Display for EightsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "current: {}", self.current_player)?;
        match self.center_pile.top() {
            Some(top) => writeln!(f, "center: {top}")?,
            None => writeln!(f, "center: empty")?,
        }
        writeln!(f, "draw pile: {} cards", self.draw_pile.len())?;
        for (player, hand) in self.hands.iter() {
            writeln!(f, "{player}: {hand}")?;
        }
        Ok(())
    }
}

/// Rules of the trick-discard game.
#[derive(Clone, Copy, Debug, Default)]
pub struct EightsRuleSet;

impl RuleSet for EightsRuleSet {
    type State = EightsState;
    type Move = EightsMove;

    fn make_start_state(&self, player_count: usize, mut rng: GameRng) -> EightsState {
        assert!(
            (2..=8).contains(&player_count),
            "trick-discard game supports 2-8 players, got {player_count}"
        );

        let mut draw_pile = standard_deck();
        draw_pile.shuffle(&mut rng);

        let mut hands = Vec::with_capacity(player_count);
        for _ in 0..player_count {
            hands.push(
                draw_pile
                    .pop_many(HAND_DEALT)
                    .expect("52 cards cover the deal for at most 8 players"),
            );
        }

        let mut center_pile = Pile::new();
        center_pile.push(draw_pile.pop().expect("deck is not exhausted by the deal"));

        EightsState {
            current_player: PlayerId::new(0),
            draw_pile,
            center_pile,
            hands: hands.into(),
            rng,
        }
    }

    fn list_moves(&self, state: &EightsState) -> Vec<EightsMove> {
        let mut moves = vec![EightsMove::Draw];

        if let Some(&top) = state.center_pile.top() {
            for &card in state.hands[state.current_player].iter() {
                if card.matches(top) {
                    moves.push(EightsMove::Play(card));
                }
            }
        }

        moves
    }

    fn do_move(&self, state: &EightsState, mv: &EightsMove) -> Result<EightsState, GameError> {
        let mut next = state.clone();
        let me = next.current_player;

        match mv {
            EightsMove::Draw => {
                let top = *next.center_pile.top().ok_or(GameError::EmptyPile)?;
                for _ in 0..DRAW_LIMIT {
                    next.refill_draw_pile_if_needed()?;
                    let drawn = next.draw_pile.pop()?;
                    if drawn.matches(top) {
                        next.center_pile.push(drawn);
                        break;
                    }
                    next.hands[me].push(drawn);
                }
            }
            EightsMove::Play(card) => {
                if !next.hands[me].contains(*card) {
                    return Err(GameError::IllegalMove(mv.to_string()));
                }
                next.hands[me].remove(*card);
                next.center_pile.push(*card);
            }
        }

        next.current_player = me.next(next.player_count());
        debug_assert_eq!(next.card_count(), state.card_count(), "card conservation violated");

        Ok(next)
    }

    fn is_game_over(&self, state: &EightsState) -> bool {
        state.hands.iter().any(|(_, hand)| hand.is_empty())
    }

    /// Every player whose hand is empty, by original player index.
    fn list_winners(&self, state: &EightsState) -> Vec<PlayerId> {
        state
            .hands
            .iter()
            .filter(|(_, hand)| hand.is_empty())
            .map(|(player, _)| player)
            .collect()
    }
}

/// Plays the first matching card when one exists, otherwise draws.
#[derive(Clone, Copy, Debug, Default)]
pub struct EightsTactic;

impl Tactic<EightsRuleSet> for EightsTactic {
    fn choose_move(&mut self, _state: &EightsState, moves: &[EightsMove]) -> EightsMove {
        moves
            .iter()
            .find(|mv| matches!(mv, EightsMove::Play(_)))
            .or_else(|| moves.first())
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

    /// Hand-built two-player state for scenario tests.
    fn fixed_state(hand0: &[Card], hand1: &[Card], center_top: Card, draw: &[Card]) -> EightsState {
        let hands: Vec<Pile> = vec![
            hand0.iter().copied().collect(),
            hand1.iter().copied().collect(),
        ];
        let mut center_pile = Pile::new();
        center_pile.push(center_top);

        EightsState {
            current_player: PlayerId::new(0),
            draw_pile: draw.iter().copied().collect(),
            center_pile,
            hands: hands.into(),
            rng: GameRng::new(0),
        }
    }

    #[test]
    fn test_start_state_deal() {
        let state = EightsRuleSet.make_start_state(4, GameRng::new(11));

        assert_eq!(state.player_count(), 4);
        assert_eq!(state.center_pile().len(), 1);
        assert_eq!(state.draw_pile().len(), 52 - 4 * HAND_DEALT - 1);
        for p in PlayerId::all(4) {
            assert_eq!(state.hand(p).len(), HAND_DEALT);
        }
        assert_eq!(state.card_count(), 52);
    }

    #[test]
    fn test_list_moves_matching_only() {
        let state = fixed_state(
            &[card(Suit::Hearts, 2), card(Suit::Clubs, 7), card(Suit::Spades, 3)],
            &[card(Suit::Diamonds, 9)],
            card(Suit::Hearts, 7),
            &[card(Suit::Diamonds, 4)],
        );

        let moves = EightsRuleSet.list_moves(&state);
        assert_eq!(
            moves,
            vec![
                EightsMove::Draw,
                EightsMove::Play(card(Suit::Hearts, 2)), // suit match
                EightsMove::Play(card(Suit::Clubs, 7)),  // rank match
            ]
        );
    }

    #[test]
    fn test_play_moves_card_to_center() {
        let state = fixed_state(
            &[card(Suit::Hearts, 2)],
            &[card(Suit::Diamonds, 9)],
            card(Suit::Hearts, 7),
            &[card(Suit::Diamonds, 4)],
        );

        let next = EightsRuleSet
            .do_move(&state, &EightsMove::Play(card(Suit::Hearts, 2)))
            .unwrap();

        assert!(next.hand(PlayerId::new(0)).is_empty());
        assert_eq!(next.center_pile().top(), Some(&card(Suit::Hearts, 2)));
        assert_eq!(next.current_player(), PlayerId::new(1));
        assert_eq!(next.card_count(), state.card_count());
    }

    #[test]
    fn test_draw_stops_on_match() {
        // Top is 7♥; the second drawn card (7♦) matches by rank and goes
        // to the center, the first lands in hand, the third stays put.
        let state = fixed_state(
            &[card(Suit::Clubs, 2)],
            &[card(Suit::Diamonds, 9)],
            card(Suit::Hearts, 7),
            &[
                card(Suit::Spades, 5), // bottom, never reached
                card(Suit::Diamonds, 7),
                card(Suit::Clubs, 4), // top, drawn first
            ],
        );

        let next = EightsRuleSet.do_move(&state, &EightsMove::Draw).unwrap();

        assert_eq!(next.hand(PlayerId::new(0)).len(), 2); // 2♣ + 4♣
        assert_eq!(next.center_pile().top(), Some(&card(Suit::Diamonds, 7)));
        assert_eq!(next.draw_pile().len(), 1);
        assert_eq!(next.card_count(), state.card_count());
    }

    #[test]
    fn test_draw_refills_from_center() {
        let mut state = fixed_state(
            &[card(Suit::Clubs, 2)],
            &[card(Suit::Diamonds, 9)],
            card(Suit::Hearts, 7),
            &[],
        );
        // Bury extra non-matching cards under the center top so the
        // refill has enough stock for a full three-card draw.
        let top = state.center_pile.pop().unwrap();
        state.center_pile.push(card(Suit::Spades, 5));
        state.center_pile.push(card(Suit::Spades, 9));
        state.center_pile.push(card(Suit::Clubs, 4));
        state.center_pile.push(top);

        let next = EightsRuleSet.do_move(&state, &EightsMove::Draw).unwrap();

        // The center kept only its top card; none of the three drawn
        // cards matched, so all went to the hand.
        assert_eq!(next.center_pile().as_slice(), &[card(Suit::Hearts, 7)]);
        assert_eq!(next.hand(PlayerId::new(0)).len(), 4);
        assert!(next.draw_pile().is_empty());
    }

    #[test]
    fn test_winners_use_original_indices() {
        let state = fixed_state(
            &[card(Suit::Clubs, 2)],
            &[],
            card(Suit::Hearts, 7),
            &[card(Suit::Diamonds, 4)],
        );

        assert!(EightsRuleSet.is_game_over(&state));
        // Player 1 emptied their hand; the winner list must say 1, not 0.
        assert_eq!(EightsRuleSet.list_winners(&state), vec![PlayerId::new(1)]);
    }

    #[test]
    fn test_tactic_prefers_play() {
        let mut tactic = EightsTactic;
        let state = fixed_state(
            &[card(Suit::Hearts, 2)],
            &[card(Suit::Diamonds, 9)],
            card(Suit::Hearts, 7),
            &[card(Suit::Diamonds, 4)],
        );

        let moves = EightsRuleSet.list_moves(&state);
        assert_eq!(
            tactic.choose_move(&state, &moves),
            EightsMove::Play(card(Suit::Hearts, 2))
        );

        let only_draw = vec![EightsMove::Draw];
        assert_eq!(tactic.choose_move(&state, &only_draw), EightsMove::Draw);
    }
}
