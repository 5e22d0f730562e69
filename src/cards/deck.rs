//! The draw pile and discard pile.
//!
//! Both piles are ordered with the top at the end of the vector. The deck
//! moves cards between piles and hands but never judges whether a play is
//! legal; that is the caller's job (see `rules::legality`).

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::card::{Card, Rank, Suit};
use super::hand::Hand;
use crate::core::config::StarterEightPolicy;
use crate::core::rng::GameRng;
use crate::error::{EngineError, Result};

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// Draw pile plus discard pile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    /// Face-down cards; top = last.
    draw: Vector<Card>,
    /// Played cards; top = last.
    discard: Vector<Card>,
}

impl Deck {
    /// A fresh, unshuffled 52-card deck with an empty discard pile.
    #[must_use]
    pub fn standard52() -> Self {
        let draw = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(suit, rank)))
            .collect();
        Self {
            draw,
            discard: Vector::new(),
        }
    }

    /// Randomly permute the draw pile.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle_vector(&mut self.draw);
    }

    /// Deal `deal_size` cards to each hand, alternating `a`, `b`, `a`, `b`...
    ///
    /// Nothing is dealt unless both the draw pile and both hands can take
    /// the full deal.
    pub fn deal_out(&mut self, a: &mut Hand, b: &mut Hand, deal_size: usize) -> Result<()> {
        if self.draw.len() < deal_size * 2 {
            return Err(EngineError::EmptyDeck);
        }
        for hand in [&*a, &*b] {
            if hand.capacity().saturating_sub(hand.len()) < deal_size {
                return Err(EngineError::HandFull {
                    capacity: hand.capacity(),
                });
            }
        }

        for _ in 0..deal_size {
            a.push(self.deal()?)?;
            b.push(self.deal()?)?;
        }
        debug!(deal_size, remaining = self.draw.len(), "dealt hands");
        Ok(())
    }

    /// Turn the top of the draw pile onto the discard pile to start play.
    ///
    /// With [`StarterEightPolicy::Redraw`] an 8 is buried at the bottom of
    /// the draw pile and another card is turned, giving up only if every
    /// remaining card is an 8.
    pub fn play_first(&mut self, policy: StarterEightPolicy) -> Result<Card> {
        let mut card = self.deal()?;

        if policy == StarterEightPolicy::Redraw {
            let mut attempts = self.draw.len();
            while card.is_wild() && attempts > 0 {
                debug!(%card, "starter is an 8, burying it");
                self.draw.push_front(card);
                card = self.deal()?;
                attempts -= 1;
            }
        }

        self.discard.push_back(card);
        Ok(card)
    }

    /// Remove and return the top card of the draw pile.
    pub fn deal(&mut self) -> Result<Card> {
        self.draw.pop_back().ok_or(EngineError::EmptyDeck)
    }

    /// Move `hand[index]` onto the discard pile and return it.
    ///
    /// Performs no legality check.
    pub fn play(&mut self, hand: &mut Hand, index: usize) -> Result<Card> {
        let card = hand.remove(index)?;
        self.discard.push_back(card);
        Ok(card)
    }

    /// Declare the suit of the top card, which must be an undeclared 8.
    ///
    /// Fails with `EmptyDeck` when nothing has been discarded yet.
    pub fn declare_top(&mut self, suit: Suit) -> Result<Card> {
        let last = self
            .discard
            .len()
            .checked_sub(1)
            .ok_or(EngineError::EmptyDeck)?;
        let top = self.discard.get_mut(last).ok_or(EngineError::EmptyDeck)?;
        if !top.declare(suit) {
            return Err(EngineError::SuitAlreadyDeclared);
        }
        Ok(*top)
    }

    /// Current top of the discard pile.
    #[must_use]
    pub fn top_of_discard(&self) -> Option<&Card> {
        self.discard.back()
    }

    /// Shuffle every discard card except the top back into the draw pile.
    ///
    /// Declared suits are cleared on the way back. Returns the number of
    /// cards moved.
    pub fn recycle_discard(&mut self, rng: &mut GameRng) -> usize {
        if self.discard.len() <= 1 {
            return 0;
        }
        let keep_from = self.discard.len() - 1;
        let top = self.discard.split_off(keep_from);
        let moved = self.discard.len();

        for mut card in std::mem::replace(&mut self.discard, top) {
            card.clear_declaration();
            self.draw.push_back(card);
        }
        self.shuffle(rng);
        moved
    }

    /// Keep only the draw-pile cards matching `keep`.
    pub(crate) fn retain_draw(&mut self, keep: impl Fn(&Card) -> bool) {
        self.draw = self.draw.iter().filter(|card| keep(card)).copied().collect();
    }

    /// Put a card straight onto the discard pile.
    pub(crate) fn push_discard(&mut self, card: Card) {
        self.discard.push_back(card);
    }

    /// Cards left to draw.
    #[must_use]
    pub fn draw_len(&self) -> usize {
        self.draw.len()
    }

    /// Cards on the discard pile.
    #[must_use]
    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    /// Draw pile, bottom first.
    pub fn draw_pile(&self) -> impl Iterator<Item = &Card> {
        self.draw.iter()
    }

    /// Discard pile, bottom first.
    pub fn discard_pile(&self) -> impl Iterator<Item = &Card> {
        self.discard.iter()
    }
}
