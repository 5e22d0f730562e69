//! # crazy-eights
//!
//! A Crazy 8s rule engine: one human against one computer opponent.
//!
//! ## Design Principles
//!
//! 1. **Explicit State**: Every operation takes a `GameState` and returns
//!    the next one. Nothing is global, and a failed operation leaves its
//!    input untouched.
//!
//! 2. **Deterministic**: All shuffling runs off a seedable ChaCha8 generator,
//!    so a seed replays a whole session.
//!
//! 3. **Configuration Over Convention**: Deal size, hand capacity and the
//!    empty-deck and starter-8 behaviors are set through `GameConfig`.
//!
//! ## Modules
//!
//! - `core`: participants, state, actions, RNG, configuration
//! - `cards`: cards, hands and the deck
//! - `rules`: the legality rule and the `RulesEngine` trait
//! - `bot`: the greedy opponent and other move policies
//! - `games`: the Crazy 8s operations and the turn state machine
//! - `error`: the engine error type
//!
//! ## Example
//!
//! ```
//! use crazy_eights::{apply_draw, legal_moves, new_game, GameConfig, Phase};
//!
//! let state = new_game(["Ada", ""], GameConfig::default().with_seed(7)).unwrap();
//! assert_eq!(state.phase(), Phase::HumanTurn);
//!
//! let state = if legal_moves(&state).is_empty() {
//!     apply_draw(&state).unwrap()
//! } else {
//!     state
//! };
//! assert!(state.is_conserved());
//! ```

pub mod core;
pub mod cards;
pub mod rules;
pub mod bot;
pub mod games;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, EmptyDeckPolicy, GameConfig, GameRng, GameState, Phase, PlayerId,
    PlayerMap, StarterEightPolicy,
};

pub use crate::cards::{Card, Deck, Hand, Rank, Suit, DECK_SIZE};

pub use crate::rules::{is_legal, GameResult, MoveList, RulesEngine};

pub use crate::bot::{decide, play_turn, preferred_suit, BotPolicy, Decision, GreedyBot, RandomBot};

pub use crate::games::crazy_eights::{
    apply_draw, apply_pass, apply_play, is_game_over, legal_moves, new_game, reset, Command,
    CrazyEights, Event, Session,
};

pub use crate::error::{EngineError, Result};
