//! Card game logic: capture precedence and per-card point values

use super::cards_types::CardId;

/// Whether `a` beats `b`. Same suit only; the higher face value wins.
pub fn card_beats(a: CardId, b: CardId) -> bool {
    a.suit == b.suit && a.value > b.value
}

/// Points a card contributes to diao tallies and Kai Chong scores.
pub fn zhu_value(card: CardId) -> i64 {
    card.rank().zhu_value()
}

/// Number of Shang cards in a pile.
pub fn shang_count(cards: &[CardId]) -> usize {
    cards.iter().filter(|c| c.is_shang()).count()
}
