//! Rules engine trait.
//!
//! Drivers that do not care about the details of a move (simulators,
//! policies, replay tools) talk to the game through this trait:
//! - What actions are legal
//! - How an action produces the next state
//! - Whether the game is over

use crate::core::action::Action;
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::error::Result;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// The participant who emptied their hand.
    Winner(PlayerId),
}

impl GameResult {
    /// Check if a participant won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Return empty vec once the game is over
/// - `apply_action`: Must be deterministic given the state's RNG, and must
///   leave `state` untouched on error
/// - `is_terminal`: Return None while the game continues
pub trait RulesEngine {
    /// Every action the participant on turn may take.
    fn legal_actions(&self, state: &GameState) -> Vec<Action>;

    /// Apply an action for the participant on turn.
    fn apply_action(&self, state: &GameState, action: &Action) -> Result<GameState>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Whether `action` appears among the legal actions.
    fn is_legal_action(&self, state: &GameState, action: &Action) -> bool {
        self.legal_actions(state).contains(action)
    }
}
