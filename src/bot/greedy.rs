//! Greedy opponent: play the first matching card, save 8s for last.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Hand, Suit};
use crate::core::Action;
use crate::rules::is_legal;

/// What the bot wants to do this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// Play the card at `index`; `declared_suit` is set only for an 8.
    PlayCard {
        index: usize,
        declared_suit: Option<Suit>,
    },
    /// No legal card.
    Draw,
}

impl Decision {
    /// The engine action carrying out this decision.
    #[must_use]
    pub fn into_action(self) -> Action {
        match self {
            Decision::PlayCard {
                index,
                declared_suit,
            } => Action::Play {
                index,
                declared_suit,
            },
            Decision::Draw => Action::Draw,
        }
    }
}

/// Choose a move for `hand` against `top`.
///
/// The first suit-or-rank match that is not an 8 wins. Failing that the
/// first 8 is played and the suit the hand holds most of is declared.
/// With nothing playable the bot draws.
///
/// ```
/// use crazy_eights::bot::{decide, Decision};
/// use crazy_eights::cards::{Card, Hand, Rank, Suit};
///
/// let hand = Hand::from_cards(
///     [Card::new(Suit::Spades, Rank::Eight), Card::new(Suit::Hearts, Rank::Nine)],
///     14,
/// )
/// .unwrap();
/// let top = Card::new(Suit::Hearts, Rank::Five);
///
/// assert_eq!(
///     decide(&hand, &top),
///     Decision::PlayCard { index: 1, declared_suit: None }
/// );
/// ```
#[must_use]
pub fn decide(hand: &Hand, top: &Card) -> Decision {
    let mut first_eight = None;
    for (index, card) in hand.iter().enumerate() {
        if card.is_wild() {
            first_eight.get_or_insert(index);
        } else if is_legal(card, top) {
            return Decision::PlayCard {
                index,
                declared_suit: None,
            };
        }
    }

    match first_eight {
        // 8s never count toward a suit, so the played one needn't be removed first.
        Some(index) => Decision::PlayCard {
            index,
            declared_suit: Some(preferred_suit(hand)),
        },
        None => Decision::Draw,
    }
}

/// Suit held most often among the non-8 cards of `hand`.
///
/// Ties, including an empty hand, go to the earlier suit in the order
/// Hearts, Diamonds, Clubs, Spades.
#[must_use]
pub fn preferred_suit(hand: &Hand) -> Suit {
    let counts = hand.suit_counts();
    let mut best = Suit::Hearts;
    for suit in Suit::ALL {
        if counts[suit.index()] > counts[best.index()] {
            best = suit;
        }
    }
    best
}
