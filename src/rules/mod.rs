//! Game rules.
//!
//! - `legality`: the suit/rank/wild matching rule
//! - `engine`: the `RulesEngine` trait generic drivers call into
//!
//! The concrete Crazy 8s rules live in `games::crazy_eights`.

pub mod engine;
pub mod legality;

pub use engine::{GameResult, RulesEngine};
pub use legality::{is_legal, playable_indices, MoveList};
