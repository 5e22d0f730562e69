//! Crazy 8s against a computer opponent.
//!
//! Two participants, a standard 52-card deck:
//! - Each participant is dealt 8 cards and one card is turned up
//! - On your turn: play a card matching the top card's suit or rank, or
//!   any 8 (declaring a new suit), or draw, or pass
//! - First participant to empty their hand wins
//!
//! `game` holds the rule operations over `GameState`; `session` wraps them
//! in a command/event state machine for interactive hosts.

mod game;
mod session;

pub use game::{
    apply_draw, apply_pass, apply_play, can_draw, is_game_over, legal_moves, new_game, reset,
    CrazyEights,
};
pub use session::{Command, Event, Session};
