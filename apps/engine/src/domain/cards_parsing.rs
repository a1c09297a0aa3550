//! Card parsing from string ids (e.g., "c_11", "t_3")

use std::fmt;
use std::str::FromStr;

use super::cards_types::{CardId, Suit};
use crate::errors::domain::DomainError;

impl FromStr for CardId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, value) = s
            .split_once('_')
            .ok_or_else(|| DomainError::parse_card(s.to_string()))?;
        let suit = match prefix {
            "c" => Suit::Cash,
            "s" => Suit::Strings,
            "k" => Suit::Coins,
            "t" => Suit::Texts,
            _ => return Err(DomainError::parse_card(s.to_string())),
        };
        let value: u8 = value
            .parse()
            .map_err(|_| DomainError::parse_card(s.to_string()))?;
        CardId::new(suit, value).map_err(|_| DomainError::parse_card(s.to_string()))
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.suit.id_prefix(), self.value)
    }
}

/// Non-panicking helper to parse card tokens into ids.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<CardId>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<CardId>())
        .collect()
}
