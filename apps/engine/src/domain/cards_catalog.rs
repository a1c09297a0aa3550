//! The immutable 40-card catalog.

use once_cell::sync::Lazy;

use super::cards_types::{rank_for, Card, CardId, Suit};

pub const DECK_SIZE: usize = 40;

const CASH_NAMES: [&str; 11] = [
    "二十", "三十", "四十", "五十", "六十", "七十", "八十", "九十", "百萬", "千萬", "萬萬",
];
const STRINGS_NAMES: [&str; 9] = [
    "一貫", "二貫", "三貫", "四貫", "五貫", "六貫", "七貫", "八貫", "九貫",
];
const COINS_NAMES: [&str; 9] = [
    "一索", "二索", "三索", "四索", "五索", "六索", "七索", "八索", "九索",
];
const TEXTS_NAMES: [&str; 11] = [
    "九文", "八文", "七文", "六文", "五文", "四文", "三文", "二文", "一文", "半文", "空文",
];

pub const ID_BAI_WAN: CardId = CardId::new_unchecked(Suit::Cash, 9);
pub const ID_QIAN_WAN: CardId = CardId::new_unchecked(Suit::Cash, 10);
pub const ID_WAN_WAN: CardId = CardId::new_unchecked(Suit::Cash, 11);
pub const ID_8_GUAN: CardId = CardId::new_unchecked(Suit::Strings, 8);
pub const ID_9_GUAN: CardId = CardId::new_unchecked(Suit::Strings, 9);
pub const ID_8_SUO: CardId = CardId::new_unchecked(Suit::Coins, 8);
pub const ID_9_SUO: CardId = CardId::new_unchecked(Suit::Coins, 9);
pub const ID_BAN_WEN: CardId = CardId::new_unchecked(Suit::Texts, 10);
pub const ID_KONG_WEN: CardId = CardId::new_unchecked(Suit::Texts, 11);

/// The four Shang cards in suit order.
pub const SHANG_CARDS: [CardId; 4] = [ID_WAN_WAN, ID_9_GUAN, ID_9_SUO, ID_KONG_WEN];

static DECK: Lazy<Vec<Card>> = Lazy::new(|| {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        let names: &[&'static str] = match suit {
            Suit::Cash => &CASH_NAMES,
            Suit::Strings => &STRINGS_NAMES,
            Suit::Coins => &COINS_NAMES,
            Suit::Texts => &TEXTS_NAMES,
        };
        for value in 1..=suit.max_value() {
            let rank = rank_for(suit, value);
            deck.push(Card {
                id: CardId::new_unchecked(suit, value),
                rank,
                color: rank.color(),
                name: names[value as usize - 1],
            });
        }
    }
    deck
});

/// Catalog entry for an id.
pub fn card(id: CardId) -> &'static Card {
    &DECK[id.catalog_index()]
}

/// All 40 cards in catalog order.
pub fn full_deck() -> &'static [Card] {
    &DECK
}

/// All 40 ids in catalog order.
pub fn full_deck_ids() -> Vec<CardId> {
    DECK.iter().map(|c| c.id).collect()
}
