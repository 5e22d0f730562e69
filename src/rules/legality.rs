//! The matching rule shared by human and bot plays.
//!
//! A card may go on the discard pile when it matches the top card's
//! effective suit or its rank, or when it is an 8.

use smallvec::SmallVec;

use crate::cards::{Card, Hand};

/// Hand indices of playable cards, ascending.
///
/// Inline storage covers a full default hand without allocating.
pub type MoveList = SmallVec<[usize; 16]>;

/// Whether `card` may be played on `top`.
///
/// ```
/// use crazy_eights::cards::{Card, Rank, Suit};
/// use crazy_eights::rules::is_legal;
///
/// let top = Card::new(Suit::Hearts, Rank::Five);
/// assert!(is_legal(&Card::new(Suit::Hearts, Rank::Nine), &top));
/// assert!(is_legal(&Card::new(Suit::Clubs, Rank::Five), &top));
/// assert!(is_legal(&Card::new(Suit::Spades, Rank::Eight), &top));
/// assert!(!is_legal(&Card::new(Suit::Clubs, Rank::Two), &top));
/// ```
#[must_use]
pub fn is_legal(card: &Card, top: &Card) -> bool {
    card.is_wild() || card.suit == top.effective_suit() || card.rank == top.rank
}

/// Indices of every card in `hand` that may be played on `top`.
#[must_use]
pub fn playable_indices(hand: &Hand, top: &Card) -> MoveList {
    hand.iter()
        .enumerate()
        .filter(|(_, card)| is_legal(card, top))
        .map(|(index, _)| index)
        .collect()
}
