//! Playing cards: suits, ranks, and the declared suit of a played 8.
//!
//! A `Card`'s identity is its printed `(suit, rank)` pair and never changes.
//! The only mutable part is `declared`, which holds the suit chosen by the
//! player who put an 8 on the discard pile. Legality checks read
//! [`Card::effective_suit`], which prefers the declared suit.

use serde::{Deserialize, Serialize};

/// Card suit.
///
/// Declaration order doubles as the tie-break priority used by the bot
/// when choosing a suit for a wild 8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All suits in priority order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Position of this suit in [`Suit::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Hearts and Diamonds are rendered red.
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }

    /// Single glyph for the suit.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        };
        f.write_str(name)
    }
}

/// Card rank, Ace (1) through King (13).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Numeric value, 1..=13.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Rank for a numeric value, if it is in 1..=13.
    #[must_use]
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value).checked_sub(1)?).copied()
    }

    /// Short label shown on the card face.
    #[must_use]
    pub fn label(self) -> &'static str {
        const LABELS: [&str; 13] = [
            "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
        ];
        LABELS[self as usize - 1]
    }
}

/// A single playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Printed suit.
    pub suit: Suit,

    /// Printed rank.
    pub rank: Rank,

    /// Suit declared when this card was played as a wild 8.
    #[serde(default)]
    declared: Option<Suit>,
}

impl Card {
    /// Create an undeclared card.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            declared: None,
        }
    }

    /// Rank 8 is wild.
    #[must_use]
    pub fn is_wild(&self) -> bool {
        self.rank == Rank::Eight
    }

    /// The declared suit, if this 8 has had one assigned.
    #[must_use]
    pub fn declared_suit(&self) -> Option<Suit> {
        self.declared
    }

    /// Suit that legality checks match against.
    #[must_use]
    pub fn effective_suit(&self) -> Suit {
        self.declared.unwrap_or(self.suit)
    }

    /// Printed identity, ignoring any declared suit.
    #[must_use]
    pub fn identity(&self) -> (Suit, Rank) {
        (self.suit, self.rank)
    }

    /// Assign the declared suit.
    ///
    /// Returns `false` (and leaves the card untouched) unless this is an 8
    /// that has not been declared yet.
    pub(crate) fn declare(&mut self, suit: Suit) -> bool {
        if !self.is_wild() || self.declared.is_some() {
            return false;
        }
        self.declared = Some(suit);
        true
    }

    /// Drop any declared suit, e.g. when the card goes back into the draw pile.
    pub(crate) fn clear_declaration(&mut self) {
        self.declared = None;
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())?;
        if let Some(declared) = self.declared {
            write!(f, "→{}", declared.symbol())?;
        }
        Ok(())
    }
}
