//! Computer opponents.
//!
//! - `greedy`: the stateless decision procedure and suit preference
//! - `policy`: the `BotPolicy` trait, its implementations and `play_turn`

mod greedy;
mod policy;

pub use greedy::{decide, preferred_suit, Decision};
pub use policy::{play_turn, BotPolicy, GreedyBot, RandomBot};
