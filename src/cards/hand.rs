//! A participant's hand.
//!
//! Cards keep the order in which they arrived; hosts address them by index.
//! Backed by `im::Vector` so cloning a `GameState` stays O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::{Card, Suit};
use crate::error::{EngineError, Result};

/// Fixed-capacity collection of one participant's cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vector<Card>,
    capacity: usize,
}

impl Hand {
    /// Create an empty hand holding at most `capacity` cards.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            cards: Vector::new(),
            capacity,
        }
    }

    /// Build a hand from existing cards.
    ///
    /// Fails with `HandFull` if there are more cards than `capacity`.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>, capacity: usize) -> Result<Self> {
        let mut hand = Self::new(capacity);
        for card in cards {
            hand.push(card)?;
        }
        Ok(hand)
    }

    /// Number of cards held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Maximum number of cards.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// A full hand cannot draw.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.capacity
    }

    /// Card at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Iterate over cards in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Add a card at the end.
    pub fn push(&mut self, card: Card) -> Result<()> {
        if self.is_full() {
            return Err(EngineError::HandFull {
                capacity: self.capacity,
            });
        }
        self.cards.push_back(card);
        Ok(())
    }

    /// Remove and return the card at `index`; later cards shift down.
    pub fn remove(&mut self, index: usize) -> Result<Card> {
        if index >= self.cards.len() {
            return Err(EngineError::InvalidIndex {
                index,
                len: self.cards.len(),
            });
        }
        Ok(self.cards.remove(index))
    }

    /// Empty the hand, keeping its capacity.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Cards held per suit, indexed by [`Suit::index`].
    ///
    /// 8s are skipped: they are wild and count toward no suit.
    #[must_use]
    pub fn suit_counts(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for card in self.cards.iter().filter(|c| !c.is_wild()) {
            counts[card.suit.index()] += 1;
        }
        counts
    }

    /// Whether the hand holds a card of `suit` (8s excluded).
    #[must_use]
    pub fn has_suit(&self, suit: Suit) -> bool {
        self.suit_counts()[suit.index()] > 0
    }
}
