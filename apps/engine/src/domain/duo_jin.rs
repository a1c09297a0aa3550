//! Duo Jin ("seizing the brocade"): a player holding three Shang loses the
//! set when another player picks up a Shang card.

use serde::Serialize;
use tracing::info;

use crate::domain::cards_catalog::{ID_BAI_WAN, ID_WAN_WAN};
use crate::domain::cards_logic::shang_count;
use crate::domain::cards_types::{CardId, HeldCard};
use crate::domain::patterns::{PatternCategory, PatternDetail};
use crate::domain::rules::BROCADE_SHANG;
use crate::domain::state::{PlayerId, RoundState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DuoJinType {
    Normal,
    /// The seized brocade contained 萬萬.
    Cash,
    /// The victim also holds 百萬.
    NuJiang,
}

impl DuoJinType {
    pub const fn score_base(self) -> i64 {
        match self {
            DuoJinType::Normal => 3,
            DuoJinType::Cash => 5,
            DuoJinType::NuJiang => 10,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DuoJinType::Normal => "奪錦",
            DuoJinType::Cash => "奪萬錦",
            DuoJinType::NuJiang => "怒將奪錦",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuoJinInfo {
    pub victim_id: PlayerId,
    pub score_base: i64,
    #[serde(rename = "type")]
    pub kind: DuoJinType,
}

/// A seizure credited to `player`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuoJinAward {
    pub player: PlayerId,
    pub detail: PatternDetail,
    pub info: DuoJinInfo,
}

pub fn holds_brocade(captured: &[CardId]) -> bool {
    shang_count(captured) >= BROCADE_SHANG
}

/// Classify a seizure from the victim's pile.
pub fn classify(victim_captured: &[CardId]) -> DuoJinType {
    if victim_captured.contains(&ID_BAI_WAN) {
        DuoJinType::NuJiang
    } else if victim_captured.contains(&ID_WAN_WAN) {
        DuoJinType::Cash
    } else {
        DuoJinType::Normal
    }
}

/// Whose brocade, if anyone's, was seized this round.
pub fn seized_victim(state: &RoundState) -> Option<PlayerId> {
    state.duo_jin_awards.first().map(|a| a.info.victim_id)
}

/// Check whether `actor` picking up `gained` seizes someone's brocade.
///
/// Pure over `state`; the caller records the returned award. A brocade is
/// seized at most once per round.
pub fn resolve_duo_jin(
    state: &RoundState,
    actor: PlayerId,
    gained: &[CardId],
) -> Option<DuoJinAward> {
    let shang: Vec<CardId> = gained.iter().copied().filter(|c| c.is_shang()).collect();
    if shang.is_empty() || seized_victim(state).is_some() {
        return None;
    }

    let victim = state
        .players
        .iter()
        .find(|p| p.id != actor && holds_brocade(&p.captured))?;

    let kind = classify(&victim.captured);
    let info = DuoJinInfo {
        victim_id: victim.id,
        score_base: kind.score_base(),
        kind,
    };
    info!(
        round_no = state.round_no,
        player = actor,
        victim = victim.id,
        kind = ?kind,
        "duo jin"
    );

    Some(DuoJinAward {
        player: actor,
        detail: PatternDetail {
            name: kind.label().to_string(),
            score: info.score_base,
            cards: shang.into_iter().map(HeldCard::plain).collect(),
            category: PatternCategory::DuoJin,
            duo_jin: Some(info),
        },
        info,
    })
}
