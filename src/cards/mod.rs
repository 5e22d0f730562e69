//! Cards, the deck and hands.
//!
//! ## Key Types
//!
//! - `Card`: printed (suit, rank) plus the declared suit of a played 8
//! - `Deck`: draw pile and discard pile
//! - `Hand`: fixed-capacity cards of one participant

pub mod card;
pub mod deck;
pub mod hand;

pub use card::{Card, Rank, Suit};
pub use deck::{Deck, DECK_SIZE};
pub use hand::Hand;
