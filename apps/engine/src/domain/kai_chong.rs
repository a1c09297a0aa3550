//! Kai Chong ("breakout"): once every hand is empty, each pot card is matched
//! against the cards players left face-up on the table.
//!
//! [`resolve_kai_chong`] is pure and returns every decision;
//! [`run_kai_chong`] writes those decisions into the round.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::cards_catalog::{card, ID_BAI_WAN};
use crate::domain::cards_logic::zhu_value;
use crate::domain::cards_types::{CardColor, CardId, MianZhang, Rank};
use crate::domain::duo_jin::{resolve_duo_jin, DuoJinInfo};
use crate::domain::state::{seats_from, Phase, PlayerId, RoundState, TrickCard};
use crate::errors::domain::{DomainError, IllegalMoveKind};

/// Match types in descending priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    /// Both neighbours, v-1 and v+1.
    ShuangLin,
    /// Two in a row on one side.
    ShunLing,
    /// One neighbour.
    DanChong,
    /// One card two steps away.
    JianLing,
    Brother,
    Tong,
    /// Pot card is 百萬; any red card answers it.
    TeDeng,
    /// Pot card is the Mian Zhang card.
    Other,
}

impl MatchType {
    pub const fn weight(self) -> i64 {
        match self {
            MatchType::ShuangLin => 7,
            MatchType::ShunLing => 6,
            MatchType::DanChong => 5,
            MatchType::JianLing => 4,
            MatchType::Brother => 3,
            MatchType::Tong => 2,
            MatchType::TeDeng => 1,
            MatchType::Other => 0,
        }
    }

    pub const fn merit(self) -> u8 {
        match self {
            MatchType::ShuangLin | MatchType::ShunLing => 3,
            MatchType::DanChong | MatchType::JianLing | MatchType::TeDeng => 2,
            MatchType::Brother | MatchType::Tong | MatchType::Other => 1,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MatchType::ShuangLin => "雙鄰",
            MatchType::ShunLing => "順領",
            MatchType::DanChong => "單沖",
            MatchType::JianLing => "間領",
            MatchType::Brother => "兄弟",
            MatchType::Tong => "同",
            MatchType::TeDeng => "特等",
            MatchType::Other => "面張",
        }
    }
}

const PRIORITY_SCALE: i64 = 1000;

/// One resolved pot/table match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KaiChongDetail {
    pub player_id: PlayerId,
    /// The pot card.
    pub matched_card: CardId,
    pub source_cards: Vec<CardId>,
    pub score: i64,
    pub individual_scores: Vec<i64>,
    pub match_type: MatchType,
    pub priority_score: i64,
    pub merit_multiplier: u8,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duo_jin: Option<DuoJinInfo>,
}

/// Everything the breakout decided, before it is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KaiChongOutcome {
    pub details: Vec<KaiChongDetail>,
    /// Losing candidates' source cards.
    pub hidden: Vec<(PlayerId, CardId)>,
    /// Pot cards nobody matched.
    pub unmatched: Vec<CardId>,
}

#[derive(Debug, Clone)]
struct Candidate {
    player: PlayerId,
    match_type: MatchType,
    sources: Vec<CardId>,
    individual: Vec<i64>,
    score: i64,
    priority: i64,
    oldest_seq: u32,
}

impl Candidate {
    fn build(player: PlayerId, match_type: MatchType, sources: Vec<CardId>, seq: u32) -> Self {
        let merit = i64::from(match_type.merit());
        let individual: Vec<i64> = sources.iter().map(|&c| zhu_value(c) * merit).collect();
        let score = individual.iter().sum();
        Self {
            player,
            match_type,
            sources,
            individual,
            score,
            priority: match_type.weight() * PRIORITY_SCALE + score,
            oldest_seq: seq,
        }
    }
}

/// Every way `table` answers `pot`, unranked.
fn candidates_for(
    player: PlayerId,
    pot: CardId,
    table: &[&TrickCard],
    mian_zhang: Option<MianZhang>,
) -> Vec<Candidate> {
    let find = |value: Option<u8>| {
        let value = value?;
        table
            .iter()
            .copied()
            .find(|t| t.card.suit == pot.suit && t.card.value == value)
    };
    let v = pot.value;
    let below = |n: u8| v.checked_sub(n);
    let above = |n: u8| Some(v + n);

    let mut out = Vec::new();
    let mut push = |match_type: MatchType, cards: &[&TrickCard]| {
        let seq = cards.iter().map(|t| t.seq).min().unwrap_or(u32::MAX);
        let sources = cards.iter().map(|t| t.card).collect();
        out.push(Candidate::build(player, match_type, sources, seq));
    };

    if let (Some(lo), Some(hi)) = (find(below(1)), find(above(1))) {
        push(MatchType::ShuangLin, &[lo, hi]);
    }
    if let (Some(a), Some(b)) = (find(above(1)), find(above(2))) {
        push(MatchType::ShunLing, &[a, b]);
    }
    if let (Some(a), Some(b)) = (find(below(1)), find(below(2))) {
        push(MatchType::ShunLing, &[a, b]);
    }
    for t in [find(below(1)), find(above(1))].into_iter().flatten() {
        push(MatchType::DanChong, &[t]);
    }
    for t in [find(below(2)), find(above(2))].into_iter().flatten() {
        push(MatchType::JianLing, &[t]);
    }

    let pot_rank = pot.rank();
    for t in table.iter().copied().filter(|t| t.card.suit != pot.suit) {
        if pot_rank != Rank::Qing && t.card.rank() == pot_rank {
            push(MatchType::Brother, &[t]);
        }
        if t.card.value == pot.value {
            push(MatchType::Tong, &[t]);
        }
    }

    if pot == ID_BAI_WAN {
        for t in table.iter().copied().filter(|t| t.card.color() == CardColor::Red) {
            push(MatchType::TeDeng, &[t]);
        }
    }

    if let Some(mz) = mian_zhang.filter(|mz| mz.card == pot) {
        for t in table
            .iter()
            .copied()
            .filter(|t| t.card != pot && t.card.rank() == mz.substitute_rank)
        {
            push(MatchType::Other, &[t]);
        }
    }

    out
}

/// A player's strongest answer: highest priority, then the oldest table card.
fn best_candidate(mut candidates: Vec<Candidate>) -> Option<Candidate> {
    candidates.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(a.oldest_seq.cmp(&b.oldest_seq))
    });
    candidates.into_iter().next()
}

fn describe(match_type: MatchType, pot: CardId, sources: &[CardId]) -> String {
    let names: Vec<&str> = sources.iter().map(|&c| card(c).name).collect();
    format!(
        "{} {} ← {}",
        match_type.label(),
        card(pot).name,
        names.join("、")
    )
}

/// Decide the breakout for every pot card, in deal order.
///
/// A table card consumed by a match, or hidden by a losing candidate, is
/// out of play for later pot cards.
pub fn resolve_kai_chong(state: &RoundState) -> KaiChongOutcome {
    let mut outcome = KaiChongOutcome::default();
    let mut consumed: BTreeSet<CardId> = BTreeSet::new();
    let mut duo_jin_fired = false;

    for &pot in &state.pot {
        let mut best: Vec<Candidate> = state
            .players
            .iter()
            .filter_map(|p| {
                let table: Vec<&TrickCard> = p
                    .trick_pile
                    .iter()
                    .filter(|t| t.is_available() && !consumed.contains(&t.card))
                    .collect();
                best_candidate(candidates_for(p.id, pot, &table, state.mian_zhang))
            })
            .collect();

        if best.is_empty() {
            outcome.unmatched.push(pot);
            continue;
        }

        best.sort_by(|a, b| {
            b.priority.cmp(&a.priority).then(
                seats_from(state.banker, a.player).cmp(&seats_from(state.banker, b.player)),
            )
        });
        let mut ranked = best.into_iter();
        let Some(winner) = ranked.next() else {
            continue;
        };

        for loser in ranked {
            debug!(player = loser.player, pot = %pot, "kai chong candidate hidden");
            for c in loser.sources {
                consumed.insert(c);
                outcome.hidden.push((loser.player, c));
            }
        }
        consumed.extend(winner.sources.iter().copied());

        let duo_jin = if duo_jin_fired {
            None
        } else {
            resolve_duo_jin(state, winner.player, &[pot]).map(|award| award.info)
        };
        duo_jin_fired |= duo_jin.is_some();

        info!(
            round_no = state.round_no,
            player = winner.player,
            pot = %pot,
            match_type = ?winner.match_type,
            score = winner.score,
            "kai chong match"
        );

        outcome.details.push(KaiChongDetail {
            player_id: winner.player,
            matched_card: pot,
            description: describe(winner.match_type, pot, &winner.sources),
            source_cards: winner.sources,
            score: winner.score,
            individual_scores: winner.individual,
            match_type: winner.match_type,
            priority_score: winner.priority,
            merit_multiplier: winner.match_type.merit(),
            duo_jin,
        });
    }

    outcome
}

/// Run the breakout and move the round to scoring.
pub fn run_kai_chong(state: &mut RoundState) -> Result<Vec<KaiChongDetail>, DomainError> {
    if state.phase != Phase::KaiChong {
        return Err(DomainError::illegal(
            IllegalMoveKind::PhaseMismatch,
            format!("kai chong during {:?}", state.phase),
        ));
    }

    let outcome = resolve_kai_chong(state);

    for detail in &outcome.details {
        let player = state.player_mut(detail.player_id)?;
        for t in player
            .trick_pile
            .iter_mut()
            .filter(|t| detail.source_cards.contains(&t.card))
        {
            t.is_kai_chong = true;
            t.merit_multiplier = Some(detail.merit_multiplier);
        }
    }
    for &(owner, c) in &outcome.hidden {
        let player = state.player_mut(owner)?;
        if let Some(t) = player.trick_pile.iter_mut().find(|t| t.card == c) {
            t.hidden = true;
        }
    }

    state.kai_chong = outcome.details.clone();
    state.phase = Phase::Scoring;
    info!(
        round_no = state.round_no,
        matches = outcome.details.len(),
        unmatched = outcome.unmatched.len(),
        "kai chong resolved"
    );
    Ok(outcome.details)
}

/// Pot cards a player won through Kai Chong.
pub fn won_pot_cards(details: &[KaiChongDetail], player: PlayerId) -> Vec<CardId> {
    details
        .iter()
        .filter(|d| d.player_id == player)
        .map(|d| d.matched_card)
        .collect()
}
