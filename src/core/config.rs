//! Game configuration.
//!
//! Hosts build a `GameConfig` at startup, either from `Default` plus the
//! `with_*` builders or by deserializing JSON, and hand it to `new_game`.
//! The config travels inside `GameState`, so every operation sees the same
//! deal size, capacity and policies.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::DECK_SIZE;
use crate::error::{EngineError, Result};

/// What a draw does once the draw pile is exhausted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyDeckPolicy {
    /// Shuffle the discard pile, minus its top card, back into the draw pile.
    #[default]
    Reshuffle,
    /// Report `EmptyDeck` to the host.
    Fail,
}

/// What happens when the starting discard card is an 8.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarterEightPolicy {
    /// Leave it in place with no declared suit; its printed suit applies.
    #[default]
    Keep,
    /// Bury it at the bottom of the draw pile and turn another card.
    Redraw,
}

/// Configuration for a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cards dealt to each participant.
    pub deal_size: usize,

    /// Maximum cards a hand may hold.
    pub hand_capacity: usize,

    /// Behavior of a draw from an empty draw pile.
    pub empty_deck: EmptyDeckPolicy,

    /// Behavior when an 8 is turned up as the first discard.
    pub starter_eight: StarterEightPolicy,

    /// Pause hosts insert before the bot moves, in milliseconds.
    /// Purely cosmetic; the engine never sleeps.
    pub bot_delay_ms: u64,

    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            deal_size: 8,
            hand_capacity: 14,
            empty_deck: EmptyDeckPolicy::Reshuffle,
            starter_eight: StarterEightPolicy::Keep,
            bot_delay_ms: 1000,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Set the number of cards dealt to each participant.
    #[must_use]
    pub fn with_deal_size(mut self, deal_size: usize) -> Self {
        self.deal_size = deal_size;
        self
    }

    /// Set the maximum hand size.
    #[must_use]
    pub fn with_hand_capacity(mut self, capacity: usize) -> Self {
        self.hand_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_empty_deck(mut self, policy: EmptyDeckPolicy) -> Self {
        self.empty_deck = policy;
        self
    }

    #[must_use]
    pub fn with_starter_eight(mut self, policy: StarterEightPolicy) -> Self {
        self.starter_eight = policy;
        self
    }

    #[must_use]
    pub fn with_bot_delay_ms(mut self, delay_ms: u64) -> Self {
        self.bot_delay_ms = delay_ms;
        self
    }

    /// Fix the RNG seed for reproducible games.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Bot pacing as a `Duration`.
    #[must_use]
    pub fn bot_delay(&self) -> Duration {
        Duration::from_millis(self.bot_delay_ms)
    }

    /// Check that a game can be dealt with these settings.
    ///
    /// Both hands plus one starter card must fit in the deck, and a fresh
    /// hand must fit within the capacity.
    pub fn validate(&self) -> Result<()> {
        if self.deal_size == 0 {
            return Err(EngineError::InvalidConfig(
                "deal_size must be at least 1".to_string(),
            ));
        }
        if self.hand_capacity < self.deal_size {
            return Err(EngineError::InvalidConfig(format!(
                "hand_capacity ({}) is smaller than deal_size ({})",
                self.hand_capacity, self.deal_size
            )));
        }
        if self.deal_size > (DECK_SIZE - 1) / 2 {
            return Err(EngineError::InvalidConfig(format!(
                "deal_size {} leaves no starter card in a {DECK_SIZE}-card deck",
                self.deal_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.deal_size, 8);
        assert_eq!(config.hand_capacity, 14);
        assert_eq!(config.empty_deck, EmptyDeckPolicy::Reshuffle);
        assert_eq!(config.starter_eight, StarterEightPolicy::Keep);
        assert_eq!(config.bot_delay(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_deal_size(5)
            .with_hand_capacity(10)
            .with_empty_deck(EmptyDeckPolicy::Fail)
            .with_starter_eight(StarterEightPolicy::Redraw)
            .with_seed(123);

        assert_eq!(config.deal_size, 5);
        assert_eq!(config.hand_capacity, 10);
        assert_eq!(config.empty_deck, EmptyDeckPolicy::Fail);
        assert_eq!(config.starter_eight, StarterEightPolicy::Redraw);
        assert_eq!(config.seed, Some(123));
    }

    #[test]
    fn test_validate() {
        assert!(GameConfig::default().with_deal_size(0).validate().is_err());
        assert!(GameConfig::default()
            .with_deal_size(10)
            .with_hand_capacity(9)
            .validate()
            .is_err());
        assert!(GameConfig::default()
            .with_deal_size(26)
            .with_hand_capacity(30)
            .validate()
            .is_err());
        assert!(GameConfig::default()
            .with_deal_size(25)
            .with_hand_capacity(30)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_huge_deal_size() {
        let config = GameConfig::default()
            .with_deal_size(usize::MAX / 2 + 1)
            .with_hand_capacity(usize::MAX);

        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default()
            .with_empty_deck(EmptyDeckPolicy::Fail)
            .with_seed(9);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"deal_size": 7, "starter_eight": "redraw"}"#).unwrap();
        assert_eq!(config.deal_size, 7);
        assert_eq!(config.starter_eight, StarterEightPolicy::Redraw);
        assert_eq!(config.hand_capacity, 14);
        assert_eq!(config.seed, None);
    }
}
