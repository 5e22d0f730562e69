//! Game state: everything one game session owns.
//!
//! ## GameState
//!
//! - Configuration and participant names
//! - Both hands and the deck (draw + discard piles)
//! - Current phase and turn counter
//! - Action history
//! - RNG
//!
//! Hands, piles and history use `im` persistent vectors, so cloning a state
//! is O(1). Engine operations take `&GameState` and return a new state,
//! leaving the input untouched when they fail.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::action::{Action, ActionRecord};
use super::config::GameConfig;
use super::player::{default_name, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{Card, Deck, Hand, DECK_SIZE};
use crate::error::{EngineError, Result};

/// Where the game is in the turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    HumanTurn,
    BotTurn,
    /// Terminal: a hand ran out of cards.
    GameOver { winner: PlayerId },
}

impl Phase {
    /// The phase in which `player` is on turn.
    #[must_use]
    pub fn turn_of(player: PlayerId) -> Self {
        if player == PlayerId::HUMAN {
            Phase::HumanTurn
        } else {
            Phase::BotTurn
        }
    }

    /// Participant on turn, or `None` once the game is over.
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        match self {
            Phase::HumanTurn => Some(PlayerId::HUMAN),
            Phase::BotTurn => Some(PlayerId::BOT),
            Phase::GameOver { .. } => None,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self, Phase::GameOver { .. })
    }
}

/// Full state of one game.
#[derive(Clone, Debug)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) names: PlayerMap<String>,
    pub(crate) hands: PlayerMap<Hand>,
    pub(crate) deck: Deck,
    pub(crate) phase: Phase,
    pub(crate) turn_number: u32,
    pub(crate) history: Vector<ActionRecord>,
    pub(crate) rng: GameRng,
}

impl GameState {
    /// Shuffle a fresh deck, deal both hands and turn up the starter card.
    ///
    /// The human always opens.
    pub(crate) fn deal(config: GameConfig, names: PlayerMap<String>, mut rng: GameRng) -> Result<Self> {
        config.validate()?;

        let mut deck = Deck::standard52();
        deck.shuffle(&mut rng);

        let mut hands = PlayerMap::new(|_| Hand::new(config.hand_capacity));
        let (human, bot) = hands.both_mut();
        deck.deal_out(human, bot, config.deal_size)?;
        let starter = deck.play_first(config.starter_eight)?;

        info!(
            seed = rng.seed(),
            %starter,
            deal_size = config.deal_size,
            "new game dealt"
        );

        Ok(Self {
            config,
            names,
            hands,
            deck,
            phase: Phase::HumanTurn,
            turn_number: 1,
            history: Vector::new(),
            rng,
        })
    }

    /// Lay out a specific table instead of dealing at random.
    ///
    /// `human` and `bot` become the hands, `top` the only discard card, and
    /// every other card of the deck forms the shuffled draw pile. Used to
    /// set up scenarios and puzzles; the human is on turn. Both hands must
    /// hold at least one card, since an empty hand has already won.
    pub fn arranged(
        config: GameConfig,
        human: &[Card],
        bot: &[Card],
        top: Card,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;
        if human.is_empty() || bot.is_empty() {
            return Err(EngineError::InvalidConfig(
                "both hands need at least one card".to_string(),
            ));
        }

        let mut placed = FxHashSet::default();
        for card in human.iter().chain(bot).chain(std::iter::once(&top)) {
            if !placed.insert(card.identity()) {
                return Err(EngineError::InvalidConfig(format!(
                    "{card} is placed more than once"
                )));
            }
        }

        let mut rng = GameRng::new(seed);
        let mut deck = Deck::standard52();
        deck.retain_draw(|card| !placed.contains(&card.identity()));
        deck.shuffle(&mut rng);
        deck.push_discard(top);

        let hands = PlayerMap::new(|player| if player == PlayerId::HUMAN { human } else { bot })
            .try_map(|cards| Hand::from_cards(cards.iter().copied(), config.hand_capacity))?;

        Ok(Self {
            config,
            names: PlayerMap::new(|player| default_name(player).to_string()),
            hands,
            deck,
            phase: Phase::HumanTurn,
            turn_number: 1,
            history: Vector::new(),
            rng,
        })
    }

    /// Configuration this game was dealt with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Display name of a participant.
    #[must_use]
    pub fn name(&self, player: PlayerId) -> &str {
        &self.names[player]
    }

    /// A participant's hand.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.hands[player]
    }

    /// Draw and discard piles.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Current top of the discard pile.
    #[must_use]
    pub fn top_card(&self) -> Option<&Card> {
        self.deck.top_of_discard()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Participant on turn, or `None` once the game is over.
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        self.phase.active_player()
    }

    /// Turn number (starts at 1, advances every time the turn changes hands).
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Every action taken this game, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Seed of the generator that dealt this game.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Cards across both piles and both hands.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.draw_len()
            + self.deck.discard_len()
            + self.hands.iter().map(|(_, hand)| hand.len()).sum::<usize>()
    }

    /// Check that exactly the 52 distinct cards are in play.
    ///
    /// Declared suits are ignored: identity is the printed (suit, rank).
    #[must_use]
    pub fn is_conserved(&self) -> bool {
        let mut seen = FxHashSet::default();
        let all_cards = self
            .deck
            .draw_pile()
            .chain(self.deck.discard_pile())
            .chain(self.hands.iter().flat_map(|(_, hand)| hand.iter()));

        for card in all_cards {
            if !seen.insert(card.identity()) {
                return false;
            }
        }
        seen.len() == DECK_SIZE
    }

    /// Hand the turn to the other participant.
    pub(crate) fn advance_turn(&mut self, from: PlayerId) {
        self.phase = Phase::turn_of(from.opponent());
        self.turn_number += 1;
    }

    pub(crate) fn record(&mut self, player: PlayerId, action: Action, card: Option<Card>) {
        let record = ActionRecord::new(player, action, self.turn_number, card);
        self.history.push_back(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn names() -> PlayerMap<String> {
        PlayerMap::new(|p| format!("seat {}", p.index()))
    }

    #[test]
    fn test_deal_partitions_deck() {
        let state = GameState::deal(GameConfig::default(), names(), GameRng::new(42)).unwrap();

        assert_eq!(state.hand(PlayerId::HUMAN).len(), 8);
        assert_eq!(state.hand(PlayerId::BOT).len(), 8);
        assert_eq!(state.deck().discard_len(), 1);
        assert_eq!(state.deck().draw_len(), 52 - 16 - 1);
        assert_eq!(state.card_count(), DECK_SIZE);
        assert!(state.is_conserved());
    }

    #[test]
    fn test_initial_phase() {
        let state = GameState::deal(GameConfig::default(), names(), GameRng::new(1)).unwrap();

        assert_eq!(state.phase(), Phase::HumanTurn);
        assert_eq!(state.active_player(), Some(PlayerId::HUMAN));
        assert_eq!(state.turn_number(), 1);
        assert!(state.history().is_empty());
        assert_eq!(state.name(PlayerId::BOT), "seat 1");
    }

    #[test]
    fn test_deal_rejects_invalid_config() {
        let config = GameConfig::default().with_deal_size(0);
        assert!(GameState::deal(config, names(), GameRng::new(1)).is_err());
    }

    #[test]
    fn test_advance_turn() {
        let mut state = GameState::deal(GameConfig::default(), names(), GameRng::new(1)).unwrap();

        state.advance_turn(PlayerId::HUMAN);
        assert_eq!(state.phase(), Phase::BotTurn);
        assert_eq!(state.turn_number(), 2);

        state.advance_turn(PlayerId::BOT);
        assert_eq!(state.phase(), Phase::HumanTurn);
        assert_eq!(state.turn_number(), 3);
    }

    #[test]
    fn test_conservation_detects_duplicates() {
        let mut state = GameState::deal(GameConfig::default(), names(), GameRng::new(5)).unwrap();
        let duplicate = *state.hand(PlayerId::BOT).get(0).unwrap();
        state.hands[PlayerId::HUMAN].push(duplicate).unwrap();

        assert_eq!(state.card_count(), DECK_SIZE + 1);
        assert!(!state.is_conserved());
    }

    #[test]
    fn test_arranged_rejects_empty_hands() {
        let two = Card::new(Suit::Spades, Rank::Two);
        let top = Card::new(Suit::Hearts, Rank::Five);

        for (human, bot) in [(&[][..], &[two][..]), (&[two][..], &[][..])] {
            assert!(matches!(
                GameState::arranged(GameConfig::default(), human, bot, top, 1),
                Err(EngineError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_arranged_rejects_duplicates() {
        let two = Card::new(Suit::Spades, Rank::Two);
        let top = Card::new(Suit::Hearts, Rank::Five);

        assert!(matches!(
            GameState::arranged(GameConfig::default(), &[two], &[two], top, 1),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_phase_helpers() {
        assert_eq!(Phase::turn_of(PlayerId::BOT), Phase::BotTurn);
        let over = Phase::GameOver { winner: PlayerId::BOT };
        assert!(over.is_over());
        assert_eq!(over.active_player(), None);
    }
}
