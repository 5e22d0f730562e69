//! Turn actions and the history record kept for each one.
//!
//! Three things can happen on a turn: play a card from the hand (declaring a
//! suit if it is an 8), draw one card, or pass. Human input and bot
//! decisions both end up as an `Action` fed through the same engine calls.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::{Card, Suit};

/// A complete turn action.
///
/// ```
/// use crazy_eights::cards::Suit;
/// use crazy_eights::core::Action;
///
/// let play = Action::play(2);
/// let wild = Action::play_wild(0, Suit::Spades);
///
/// assert!(play.is_play());
/// assert_eq!(wild.declared_suit(), Some(Suit::Spades));
/// assert!(!Action::Pass.is_play());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play the card at `index` in the acting participant's hand.
    Play {
        index: usize,
        /// Required when the card is an 8, ignored otherwise.
        declared_suit: Option<Suit>,
    },
    /// Draw one card from the draw pile.
    Draw,
    /// Yield the turn without touching the deck.
    Pass,
}

impl Action {
    /// Play a non-wild card.
    #[must_use]
    pub const fn play(index: usize) -> Self {
        Self::Play {
            index,
            declared_suit: None,
        }
    }

    /// Play an 8 and declare `suit`.
    #[must_use]
    pub const fn play_wild(index: usize, suit: Suit) -> Self {
        Self::Play {
            index,
            declared_suit: Some(suit),
        }
    }

    #[must_use]
    pub fn is_play(&self) -> bool {
        matches!(self, Action::Play { .. })
    }

    /// Declared suit carried by a play, if any.
    #[must_use]
    pub fn declared_suit(&self) -> Option<Suit> {
        match self {
            Action::Play { declared_suit, .. } => *declared_suit,
            Action::Draw | Action::Pass => None,
        }
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The participant who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Card that hit the discard pile, for plays only. Draws are not
    /// recorded with their card since the opponent cannot see it.
    pub card: Option<Card>,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, card: Option<Card>) -> Self {
        Self {
            player,
            action,
            turn,
            card,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rank;

    #[test]
    fn test_play_constructors() {
        assert_eq!(
            Action::play(3),
            Action::Play {
                index: 3,
                declared_suit: None
            }
        );
        assert_eq!(Action::play_wild(1, Suit::Clubs).declared_suit(), Some(Suit::Clubs));
        assert_eq!(Action::Draw.declared_suit(), None);
    }

    #[test]
    fn test_action_record() {
        let card = Card::new(Suit::Hearts, Rank::Nine);
        let record = ActionRecord::new(PlayerId::BOT, Action::play(0), 3, Some(card));

        assert_eq!(record.player, PlayerId::BOT);
        assert_eq!(record.action, Action::play(0));
        assert_eq!(record.turn, 3);
        assert_eq!(record.card, Some(card));
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::play_wild(4, Suit::Diamonds);
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, deserialized);
    }
}
