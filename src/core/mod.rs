//! Core engine types: participants, state, actions, RNG, configuration.
//!
//! These are the building blocks every other module works with. Games are
//! configured through `GameConfig` rather than by changing rule code.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use player::{default_name, PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
pub use config::{EmptyDeckPolicy, GameConfig, StarterEightPolicy};
pub use action::{Action, ActionRecord};
pub use state::{GameState, Phase};
