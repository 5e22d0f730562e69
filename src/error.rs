//! Engine error type.
//!
//! Every variant is recoverable at the turn boundary: operations work on a
//! copy of the state, so a failed call leaves the caller's state untouched.

use thiserror::Error;

use crate::cards::Card;
use crate::core::PlayerId;

/// Errors reported by deck, hand and game operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The card matches neither suit nor rank of the top card and is not an 8.
    #[error("{card} cannot be played on {top}: it must match the suit or rank of the top card")]
    IllegalPlay { card: Card, top: Card },

    /// Draw requested with a hand already at capacity.
    #[error("hand is full ({capacity} cards), cannot draw")]
    HandFull { capacity: usize },

    /// The pile an operation needs is empty: nothing left to draw, or no
    /// discard to declare a suit on.
    #[error("pile is empty")]
    EmptyDeck,

    /// Hand index out of range.
    #[error("no card at hand index {index} (hand holds {len})")]
    InvalidIndex { index: usize, len: usize },

    /// An 8 was played without choosing a suit.
    #[error("playing an 8 requires declaring a suit")]
    SuitRequired,

    /// The top card is not an undeclared 8.
    #[error("the top card's suit cannot be declared")]
    SuitAlreadyDeclared,

    /// A command arrived for the seat that is not on turn.
    #[error("it is not {player}'s turn")]
    NotYourTurn { player: PlayerId },

    /// A move was requested after the game ended.
    #[error("the game is over")]
    GameOver,

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for engine results.
pub type Result<T> = std::result::Result<T, EngineError>;
