//! Score settlement: a pure function from the round's scoring facts to one
//! `ScoreResult` per player.
//!
//! Every category nets peasants against the banker, so a round's totals
//! always sum to zero. Duo Jin moves points straight from victim to thief;
//! the bao pei penalty moves points from one peasant to the others.

use serde::Serialize;
use tracing::info;

use crate::config::ScoringConfig;
use crate::domain::cards_logic::zhu_value;
use crate::domain::cards_types::CardId;
use crate::domain::duo_jin::DuoJinInfo;
use crate::domain::kai_chong::KaiChongDetail;
use crate::domain::patterns::{PatternCategory, PatternDetail};
use crate::domain::risk::{RiskLevel, ViolationRecord};
use crate::domain::rules::PLAYERS;
use crate::domain::special_capture::SpecialCaptureFlags;
use crate::domain::state::{PlayerId, Role, TrickCard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreCategory {
    Diao,
    KaiZhu,
    QiaoMen,
    SeYang,
    KaiChong,
    DuoJin,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; 6] = [
        ScoreCategory::Diao,
        ScoreCategory::KaiZhu,
        ScoreCategory::QiaoMen,
        ScoreCategory::SeYang,
        ScoreCategory::KaiChong,
        ScoreCategory::DuoJin,
    ];

    /// Settled by banker/peasant netting rather than direct transfer.
    pub const fn is_netted(self) -> bool {
        !matches!(self, ScoreCategory::DuoJin)
    }
}

impl From<PatternCategory> for ScoreCategory {
    fn from(category: PatternCategory) -> Self {
        match category {
            PatternCategory::KaiZhu => ScoreCategory::KaiZhu,
            PatternCategory::QiaoMen => ScoreCategory::QiaoMen,
            PatternCategory::SeYang | PatternCategory::KcSeYang => ScoreCategory::SeYang,
            PatternCategory::DuoJin => ScoreCategory::DuoJin,
        }
    }
}

/// Points per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPoints {
    pub diao: i64,
    pub kai_zhu: i64,
    pub qiao_men: i64,
    pub se_yang: i64,
    pub kai_chong: i64,
    pub duo_jin: i64,
}

impl CategoryPoints {
    pub fn get(&self, category: ScoreCategory) -> i64 {
        match category {
            ScoreCategory::Diao => self.diao,
            ScoreCategory::KaiZhu => self.kai_zhu,
            ScoreCategory::QiaoMen => self.qiao_men,
            ScoreCategory::SeYang => self.se_yang,
            ScoreCategory::KaiChong => self.kai_chong,
            ScoreCategory::DuoJin => self.duo_jin,
        }
    }

    fn slot(&mut self, category: ScoreCategory) -> &mut i64 {
        match category {
            ScoreCategory::Diao => &mut self.diao,
            ScoreCategory::KaiZhu => &mut self.kai_zhu,
            ScoreCategory::QiaoMen => &mut self.qiao_men,
            ScoreCategory::SeYang => &mut self.se_yang,
            ScoreCategory::KaiChong => &mut self.kai_chong,
            ScoreCategory::DuoJin => &mut self.duo_jin,
        }
    }

    pub fn add(&mut self, category: ScoreCategory, points: i64) {
        *self.slot(category) += points;
    }

    pub fn total(&self) -> i64 {
        ScoreCategory::ALL.iter().map(|&c| self.get(c)).sum()
    }
}

/// One player's scoring facts for the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRoundInput {
    pub player_id: PlayerId,
    pub role: Role,
    pub captured: Vec<CardId>,
    pub trick_pile: Vec<TrickCard>,
    pub trick_count: u32,
    /// Detected patterns, Duo Jin details from captures included.
    pub patterns: Vec<PatternDetail>,
    pub kai_chong: Vec<KaiChongDetail>,
    pub special_captures: SpecialCaptureFlags,
}

/// A Duo Jin to settle, credited to `thief`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuoJinTransfer {
    pub thief: PlayerId,
    pub info: DuoJinInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementInput {
    pub round_no: u32,
    pub banker: PlayerId,
    /// Seat order.
    pub players: Vec<PlayerRoundInput>,
    pub duo_jin: Vec<DuoJinTransfer>,
    pub violations: Vec<ViolationRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyAdjustment {
    pub payer_id: PlayerId,
    /// Rule id of the triggering violation.
    pub reason: &'static str,
    /// Signed change applied to this player.
    pub adjustment: i64,
}

/// Authoritative per-player round output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub player_id: PlayerId,
    pub role: Role,
    pub raw: CategoryPoints,
    pub settled: CategoryPoints,
    pub total_round_change: i64,
    pub trick_count: u32,
    pub diao_raw_value: i64,
    pub patterns: Vec<String>,
    pub pattern_details: Vec<PatternDetail>,
    pub kai_chong_details: Vec<KaiChongDetail>,
    pub cards_won_count: usize,
    pub visible_trick_cards: Vec<TrickCard>,
    pub scoring_cards: Vec<CardId>,
    pub all_captured_cards: Vec<CardId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penalty: Option<PenaltyAdjustment>,
    pub violations: Vec<ViolationRecord>,
    pub special_captures: SpecialCaptureFlags,
    pub coin_change: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationCategory {
    Pattern,
    KaiChong,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreNotification {
    pub id: String,
    pub player_id: PlayerId,
    pub text: String,
    pub delta: i64,
    pub category: NotificationCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub results: Vec<ScoreResult>,
    pub notifications: Vec<ScoreNotification>,
}

fn raw_points(p: &PlayerRoundInput) -> CategoryPoints {
    let mut raw = CategoryPoints {
        diao: p.captured.iter().map(|&c| zhu_value(c)).sum(),
        ..CategoryPoints::default()
    };
    for pattern in &p.patterns {
        if pattern.category != PatternCategory::DuoJin {
            raw.add(pattern.category.into(), pattern.score);
        }
    }
    raw.kai_chong = p.kai_chong.iter().map(|d| d.score).sum();
    raw
}

/// The earliest PENALTY violation by a peasant.
fn bao_pei_trigger<'a>(
    violations: &'a [ViolationRecord],
    banker: PlayerId,
) -> Option<&'a ViolationRecord> {
    violations
        .iter()
        .find(|v| v.player_id != banker && v.risk_level == RiskLevel::Penalty)
}

/// Settle a round. Identical inputs yield identical output.
pub fn settle(input: &SettlementInput, config: &ScoringConfig) -> Settlement {
    let n = input.players.len();
    let mut raw: Vec<CategoryPoints> = input.players.iter().map(raw_points).collect();
    let mut settled = vec![CategoryPoints::default(); n];

    for transfer in &input.duo_jin {
        let base = transfer.info.score_base;
        let victim = transfer.info.victim_id as usize;
        let thief = transfer.thief as usize;
        if victim < n && thief < n {
            raw[thief].duo_jin += base;
            raw[victim].duo_jin -= base;
        }
    }

    let banker = input.banker as usize;
    for category in ScoreCategory::ALL {
        let m = config.multipliers.get(category);
        if !category.is_netted() {
            for (i, points) in settled.iter_mut().enumerate() {
                *points.slot(category) = raw[i].get(category) * m;
            }
            continue;
        }
        let banker_raw = raw.get(banker).map_or(0, |r| r.get(category));
        let mut peasants_sum = 0;
        for i in (0..n).filter(|&i| i != banker) {
            let delta = (raw[i].get(category) - banker_raw) * m;
            *settled[i].slot(category) = delta;
            peasants_sum += delta;
        }
        if let Some(b) = settled.get_mut(banker) {
            *b.slot(category) = -peasants_sum;
        }
    }

    let mut totals: Vec<i64> = settled.iter().map(CategoryPoints::total).collect();

    let mut penalties: Vec<Option<PenaltyAdjustment>> = vec![None; n];
    if let Some(trigger) = bao_pei_trigger(&input.violations, input.banker) {
        let payer = trigger.player_id as usize;
        let mut covered = 0;
        for i in (0..n).filter(|&i| i != banker && i != payer) {
            if totals[i] < 0 {
                let cover = -totals[i];
                covered += cover;
                totals[i] += cover;
                penalties[i] = Some(PenaltyAdjustment {
                    payer_id: trigger.player_id,
                    reason: trigger.rule_id,
                    adjustment: cover,
                });
            }
        }
        // Nothing to cover: the violation stays on record but costs nothing.
        if covered > 0 && payer < n {
            totals[payer] -= covered;
            penalties[payer] = Some(PenaltyAdjustment {
                payer_id: trigger.player_id,
                reason: trigger.rule_id,
                adjustment: -covered,
            });
            info!(
                round_no = input.round_no,
                payer = trigger.player_id,
                rule_id = trigger.rule_id,
                covered,
                "bao pei applied"
            );
        }
    }

    let mut results = Vec::with_capacity(n);
    let mut notifications = Vec::new();
    for (i, p) in input.players.iter().enumerate() {
        let total = totals[i];
        let violations: Vec<ViolationRecord> = input
            .violations
            .iter()
            .filter(|v| v.player_id == p.player_id)
            .cloned()
            .collect();

        let mut scoring_cards: Vec<CardId> = p
            .patterns
            .iter()
            .flat_map(|d| d.card_ids())
            .chain(p.kai_chong.iter().flat_map(|d| d.source_cards.iter().copied()))
            .collect();
        scoring_cards.sort();
        scoring_cards.dedup();

        let result = ScoreResult {
            player_id: p.player_id,
            role: p.role,
            raw: raw[i],
            settled: settled[i],
            total_round_change: total,
            trick_count: p.trick_count,
            diao_raw_value: raw[i].diao,
            patterns: p.patterns.iter().map(|d| d.name.clone()).collect(),
            pattern_details: p.patterns.clone(),
            kai_chong_details: p.kai_chong.clone(),
            cards_won_count: p.captured.len(),
            visible_trick_cards: p
                .trick_pile
                .iter()
                .filter(|t| t.is_face_up)
                .cloned()
                .collect(),
            scoring_cards,
            all_captured_cards: p.captured.clone(),
            penalty: penalties[i].clone(),
            violations,
            special_captures: p.special_captures,
            coin_change: total * config.exchange_rate,
        };
        notifications.extend(notifications_for(input, &result, config));
        results.push(result);
    }

    info!(
        round_no = input.round_no,
        totals = ?totals,
        "round settled"
    );

    Settlement {
        results,
        notifications,
    }
}

fn notifications_for(
    input: &SettlementInput,
    result: &ScoreResult,
    config: &ScoringConfig,
) -> Vec<ScoreNotification> {
    let mut out = Vec::new();
    let mut push = |text: String, delta: i64, category: NotificationCategory| {
        let id = format!(
            "r{}-p{}-{}",
            input.round_no,
            result.player_id,
            out.len() + 1
        );
        out.push(ScoreNotification {
            id,
            player_id: result.player_id,
            text,
            delta,
            category,
        });
    };

    for d in result
        .pattern_details
        .iter()
        .filter(|d| d.category != PatternCategory::DuoJin)
    {
        push(
            format!("{} +{}", d.name, d.score),
            d.score,
            NotificationCategory::Pattern,
        );
    }
    for d in &result.kai_chong_details {
        push(d.description.clone(), d.score, NotificationCategory::KaiChong);
    }

    let m = config.multipliers.duo_jin;
    for t in &input.duo_jin {
        let delta = t.info.score_base * m;
        if t.thief == result.player_id {
            push(
                format!("奪錦 from player {}", t.info.victim_id),
                delta,
                NotificationCategory::Critical,
            );
        } else if t.info.victim_id == result.player_id {
            push(
                format!("brocade seized by player {}", t.thief),
                -delta,
                NotificationCategory::Critical,
            );
        }
    }

    if let Some(p) = &result.penalty {
        push(
            format!("包賠 {}", p.reason),
            p.adjustment,
            NotificationCategory::Critical,
        );
    }

    out
}

/// Sum of all players' round changes; zero for any settled round.
pub fn net_change(results: &[ScoreResult]) -> i64 {
    results.iter().map(|r| r.total_round_change).sum()
}

/// Seat-indexed totals, for applying to cumulative scores.
pub fn totals_by_seat(results: &[ScoreResult]) -> [i64; PLAYERS] {
    let mut totals = [0; PLAYERS];
    for r in results {
        if let Some(slot) = totals.get_mut(r.player_id as usize) {
            *slot = r.total_round_change;
        }
    }
    totals
}
