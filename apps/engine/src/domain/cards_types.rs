//! Core card-related types: Suit, Rank, CardColor, CardId, Card, HeldCard

use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Cash,
    Strings,
    Coins,
    Texts,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Cash, Suit::Strings, Suit::Coins, Suit::Texts];

    /// Highest face value in the suit; also the value of its Shang card.
    pub const fn max_value(self) -> u8 {
        match self {
            Suit::Cash | Suit::Texts => 11,
            Suit::Strings | Suit::Coins => 9,
        }
    }

    pub const fn id_prefix(self) -> char {
        match self {
            Suit::Cash => 'c',
            Suit::Strings => 's',
            Suit::Coins => 'k',
            Suit::Texts => 't',
        }
    }

    /// Offset of the suit's first card in catalog order.
    pub(crate) const fn catalog_offset(self) -> usize {
        match self {
            Suit::Cash => 0,
            Suit::Strings => 11,
            Suit::Coins => 20,
            Suit::Texts => 29,
        }
    }
}

/// The five rank tiers. Ranks are not ordered against each other; capture
/// precedence uses face value within a suit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rank {
    /// Top (reward) tier
    Zun,
    /// Shoulder
    Jian,
    /// Hundred; only the Cash suit's 百萬
    Bai,
    /// Extreme
    Ji,
    /// Normal
    Qing,
}

impl Rank {
    pub const fn color(self) -> CardColor {
        match self {
            Rank::Zun | Rank::Jian | Rank::Bai => CardColor::Red,
            Rank::Ji => CardColor::Green,
            Rank::Qing => CardColor::Black,
        }
    }

    /// Points a card of this rank is worth in diao tallies and Kai Chong.
    pub const fn zhu_value(self) -> i64 {
        match self {
            Rank::Zun => 3,
            Rank::Jian | Rank::Bai => 2,
            Rank::Ji | Rank::Qing => 1,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardColor {
    Red,
    Green,
    Black,
}

/// Stable card identity: suit plus face value (`c_11`, `t_3`, ...).
///
/// Ord is catalog order (suit, then value) and only used for stable sorting.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CardId {
    pub suit: Suit,
    pub value: u8,
}

impl CardId {
    pub fn new(suit: Suit, value: u8) -> Result<Self, DomainError> {
        if value == 0 || value > suit.max_value() {
            return Err(DomainError::parse_card(format!(
                "value {value} out of range for {suit:?}"
            )));
        }
        Ok(Self { suit, value })
    }

    /// Build an id known to be in range (catalog construction and constants).
    pub(crate) const fn new_unchecked(suit: Suit, value: u8) -> Self {
        Self { suit, value }
    }

    pub(crate) const fn catalog_index(self) -> usize {
        self.suit.catalog_offset() + self.value as usize - 1
    }

    pub fn rank(self) -> Rank {
        rank_for(self.suit, self.value)
    }

    pub fn color(self) -> CardColor {
        self.rank().color()
    }

    pub fn is_shang(self) -> bool {
        self.value == self.suit.max_value()
    }

    pub fn is_shoulder(self) -> bool {
        self.value + 1 == self.suit.max_value()
    }
}

/// Rank tier of a face value within its suit.
pub const fn rank_for(suit: Suit, value: u8) -> Rank {
    match suit {
        Suit::Cash => match value {
            10 | 11 => Rank::Zun,
            9 => Rank::Bai,
            1 => Rank::Ji,
            _ => Rank::Qing,
        },
        Suit::Strings | Suit::Coins => match value {
            9 => Rank::Zun,
            8 => Rank::Jian,
            1 => Rank::Ji,
            _ => Rank::Qing,
        },
        Suit::Texts => match value {
            11 => Rank::Zun,
            10 => Rank::Jian,
            1 => Rank::Ji,
            _ => Rank::Qing,
        },
    }
}

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub rank: Rank,
    pub color: CardColor,
    pub name: &'static str,
}

impl Card {
    pub fn suit(&self) -> Suit {
        self.id.suit
    }

    pub fn value(&self) -> u8 {
        self.id.value
    }
}

/// A card reference as it appears in a scoring set, optionally standing in
/// for another rank through the round's Mian Zhang substitution.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeldCard {
    pub id: CardId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitute_rank: Option<Rank>,
}

impl HeldCard {
    pub fn plain(id: CardId) -> Self {
        Self {
            id,
            substitute_rank: None,
        }
    }

    pub fn substituted(id: CardId, rank: Rank) -> Self {
        Self {
            id,
            substitute_rank: Some(rank),
        }
    }

    pub fn original_rank(&self) -> Rank {
        self.id.rank()
    }

    /// Rank used by rule evaluation: the substitute when one is set.
    pub fn effective_rank(&self) -> Rank {
        self.substitute_rank.unwrap_or_else(|| self.original_rank())
    }
}

/// The round's designated stand-in card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MianZhang {
    pub card: CardId,
    pub substitute_rank: Rank,
}
