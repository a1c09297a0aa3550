//! Pattern detector: scans a captured pile for scoring combinations.
//!
//! Each category is evaluated independently against its fixed table,
//! highest-scoring entries first. Inside one category a physical card is
//! used by at most one instance; across categories cards may be shared.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::cards_catalog::{
    ID_8_GUAN, ID_8_SUO, ID_9_GUAN, ID_9_SUO, ID_BAI_WAN, ID_BAN_WEN, ID_KONG_WEN, ID_QIAN_WAN,
    ID_WAN_WAN,
};
use crate::domain::cards_types::{CardId, HeldCard, MianZhang, Rank, Suit};
use crate::domain::duo_jin::DuoJinInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatternCategory {
    KaiZhu,
    QiaoMen,
    SeYang,
    /// Se Yang completed with a pot card won in Kai Chong.
    KcSeYang,
    DuoJin,
}

/// A detected combination. Produced once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternDetail {
    pub name: String,
    pub score: i64,
    pub cards: Vec<HeldCard>,
    pub category: PatternCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duo_jin: Option<DuoJinInfo>,
}

impl PatternDetail {
    pub fn card_ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(|h| h.id)
    }
}

struct PatternEntry {
    name: &'static str,
    points: i64,
    cards: &'static [CardId],
    /// Part of the brocade; withheld from a player whose brocade was seized.
    shang_set: bool,
}

const fn entry(name: &'static str, points: i64, cards: &'static [CardId]) -> PatternEntry {
    PatternEntry {
        name,
        points,
        cards,
        shang_set: false,
    }
}

const fn shang_entry(name: &'static str, points: i64, cards: &'static [CardId]) -> PatternEntry {
    PatternEntry {
        name,
        points,
        cards,
        shang_set: true,
    }
}

const ID_1_CASH: CardId = CardId::new_unchecked(Suit::Cash, 1);
const ID_1_GUAN: CardId = CardId::new_unchecked(Suit::Strings, 1);
const ID_1_SUO: CardId = CardId::new_unchecked(Suit::Coins, 1);
const ID_1_WEN: CardId = CardId::new_unchecked(Suit::Texts, 1);

// Tables are kept in descending point order.
static KAI_ZHU: [PatternEntry; 4] = [
    entry("萬千百", 5, &[ID_WAN_WAN, ID_QIAN_WAN, ID_BAI_WAN]),
    entry("萬千", 3, &[ID_WAN_WAN, ID_QIAN_WAN]),
    entry("千百", 2, &[ID_QIAN_WAN, ID_BAI_WAN]),
    entry("萬百", 2, &[ID_WAN_WAN, ID_BAI_WAN]),
];

static QIAO_MEN: [PatternEntry; 4] = [
    entry("十巧門", 2, &[ID_WAN_WAN, ID_QIAN_WAN]),
    entry("貫巧門", 2, &[ID_9_GUAN, ID_8_GUAN]),
    entry("索巧門", 2, &[ID_9_SUO, ID_8_SUO]),
    entry("文巧門", 2, &[ID_KONG_WEN, ID_BAN_WEN]),
];

static SE_YANG: [PatternEntry; 7] = [
    shang_entry("四賞", 10, &[ID_WAN_WAN, ID_9_GUAN, ID_9_SUO, ID_KONG_WEN]),
    entry("四肩", 6, &[ID_QIAN_WAN, ID_8_GUAN, ID_8_SUO, ID_BAN_WEN]),
    shang_entry("三賞", 5, &[ID_WAN_WAN, ID_9_GUAN, ID_9_SUO]),
    shang_entry("三賞", 5, &[ID_WAN_WAN, ID_9_GUAN, ID_KONG_WEN]),
    shang_entry("三賞", 5, &[ID_WAN_WAN, ID_9_SUO, ID_KONG_WEN]),
    shang_entry("三賞", 5, &[ID_9_GUAN, ID_9_SUO, ID_KONG_WEN]),
    entry("四極", 4, &[ID_1_CASH, ID_1_GUAN, ID_1_SUO, ID_1_WEN]),
];

/// Shortest run of consecutive QING values that scores.
const MIN_RUN: usize = 3;

/// Round facts that change how a pile is read.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternContext<'a> {
    pub mian_zhang: Option<MianZhang>,
    /// Pot cards this player won through Kai Chong.
    pub kai_chong_cards: &'a [CardId],
    /// This player's brocade was seized by Duo Jin.
    pub brocade_seized: bool,
}

/// Detect every pattern in a captured pile.
///
/// Safe to call on a partial pile for mid-round previews.
pub fn detect_patterns(captured: &[CardId], ctx: &PatternContext<'_>) -> Vec<PatternDetail> {
    let mut out = Vec::new();

    let mut used = BTreeSet::new();
    out.extend(match_table(
        &KAI_ZHU,
        PatternCategory::KaiZhu,
        captured,
        &mut used,
        ctx,
        None,
    ));

    let mut used = BTreeSet::new();
    out.extend(match_table(
        &QIAO_MEN,
        PatternCategory::QiaoMen,
        captured,
        &mut used,
        ctx,
        None,
    ));

    let mut se_yang_used = BTreeSet::new();
    out.extend(match_table(
        &SE_YANG,
        PatternCategory::SeYang,
        captured,
        &mut se_yang_used,
        ctx,
        None,
    ));
    out.extend(qing_runs(captured, &mut se_yang_used));

    if !ctx.kai_chong_cards.is_empty() {
        let pool: Vec<CardId> = captured
            .iter()
            .chain(ctx.kai_chong_cards.iter())
            .copied()
            .collect();
        out.extend(match_table(
            &SE_YANG,
            PatternCategory::KcSeYang,
            &pool,
            &mut se_yang_used,
            ctx,
            Some(ctx.kai_chong_cards),
        ));
    }

    out
}

fn match_table(
    table: &[PatternEntry],
    category: PatternCategory,
    pool: &[CardId],
    used: &mut BTreeSet<CardId>,
    ctx: &PatternContext<'_>,
    require_any: Option<&[CardId]>,
) -> Vec<PatternDetail> {
    let mut found = Vec::new();
    for entry in table {
        if entry.shang_set && ctx.brocade_seized {
            continue;
        }
        let Some(cards) = fill_entry(entry, pool, used, ctx.mian_zhang) else {
            continue;
        };
        if let Some(required) = require_any {
            if !cards.iter().any(|h| required.contains(&h.id)) {
                continue;
            }
        }
        used.extend(cards.iter().map(|h| h.id));
        found.push(PatternDetail {
            name: entry.name.to_string(),
            score: entry.points,
            cards,
            category,
            duo_jin: None,
        });
    }
    found
}

/// Take every card the entry needs from the pool, letting the Mian Zhang
/// card fill at most one missing slot of its substitute rank.
fn fill_entry(
    entry: &PatternEntry,
    pool: &[CardId],
    used: &BTreeSet<CardId>,
    mian_zhang: Option<MianZhang>,
) -> Option<Vec<HeldCard>> {
    let available = |id: &CardId| pool.contains(id) && !used.contains(id);
    let mut cards = Vec::with_capacity(entry.cards.len());
    let mut substituted = false;

    for need in entry.cards {
        if available(need) {
            cards.push(HeldCard::plain(*need));
            continue;
        }
        let mz = mian_zhang?;
        let can_substitute = !substituted
            && available(&mz.card)
            && !entry.cards.contains(&mz.card)
            && need.rank() == mz.substitute_rank;
        if !can_substitute {
            return None;
        }
        cards.push(HeldCard::substituted(mz.card, mz.substitute_rank));
        substituted = true;
    }
    Some(cards)
}

fn suit_label(suit: Suit) -> &'static str {
    match suit {
        Suit::Cash => "十",
        Suit::Strings => "貫",
        Suit::Coins => "索",
        Suit::Texts => "文",
    }
}

/// Maximal runs of consecutive QING values in one suit score `len - 2`.
fn qing_runs(captured: &[CardId], used: &mut BTreeSet<CardId>) -> Vec<PatternDetail> {
    let mut found = Vec::new();
    for suit in Suit::ALL {
        let mut values: Vec<u8> = captured
            .iter()
            .filter(|c| c.suit == suit && c.rank() == Rank::Qing && !used.contains(c))
            .map(|c| c.value)
            .collect();
        values.sort_unstable();
        values.dedup();

        let mut run: Vec<u8> = Vec::new();
        for value in values.into_iter().chain(std::iter::once(u8::MAX)) {
            if run.last().is_some_and(|&last| last + 1 == value) {
                run.push(value);
                continue;
            }
            if run.len() >= MIN_RUN {
                let cards: Vec<HeldCard> = run
                    .iter()
                    .map(|&v| HeldCard::plain(CardId::new_unchecked(suit, v)))
                    .collect();
                used.extend(cards.iter().map(|h| h.id));
                found.push(PatternDetail {
                    name: format!("{}順{}", suit_label(suit), run.len()),
                    score: run.len() as i64 - 2,
                    cards,
                    category: PatternCategory::SeYang,
                    duo_jin: None,
                });
            }
            run.clear();
            run.push(value);
        }
    }
    found
}
