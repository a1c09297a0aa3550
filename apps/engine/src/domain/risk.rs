//! Risk & violation assessor.
//!
//! Classifies a candidate play before it is committed. Rules are checked in
//! tier order (PENALTY, WARNING, NOTICE) and the first match wins; a play no
//! rule matches is SAFE. Classification is a pure function of the play, the
//! round state and the evaluated tactical contexts.

use serde::Serialize;

use crate::domain::cards_logic::shang_count;
use crate::domain::cards_types::{CardColor, CardId, Suit};
use crate::domain::state::{PlayerId, PlayerState, Role, RoundState, SuitStatus};
use crate::domain::tricks::{preview_capture, Capture};
use crate::errors::domain::DomainError;

/// Severity, ordered from harmless to penalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Safe,
    Notice,
    Warning,
    Penalty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TacticalPriority {
    AntiBanker,
    AntiBaiLao,
    AntiSeYang,
}

/// The tactical contexts a classification is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TacticalSet {
    anti_banker: bool,
    anti_bai_lao: bool,
    anti_se_yang: bool,
}

impl TacticalSet {
    pub const fn all() -> Self {
        Self {
            anti_banker: true,
            anti_bai_lao: true,
            anti_se_yang: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            anti_banker: false,
            anti_bai_lao: false,
            anti_se_yang: false,
        }
    }

    pub const fn with(mut self, context: TacticalPriority) -> Self {
        match context {
            TacticalPriority::AntiBanker => self.anti_banker = true,
            TacticalPriority::AntiBaiLao => self.anti_bai_lao = true,
            TacticalPriority::AntiSeYang => self.anti_se_yang = true,
        }
        self
    }

    pub const fn contains(&self, context: TacticalPriority) -> bool {
        match context {
            TacticalPriority::AntiBanker => self.anti_banker,
            TacticalPriority::AntiBaiLao => self.anti_bai_lao,
            TacticalPriority::AntiSeYang => self.anti_se_yang,
        }
    }

    /// Peasants play against the banker and the Bai Lao; the banker only
    /// guards against Se Yang.
    pub const fn defaults_for(role: Role) -> Self {
        match role {
            Role::Peasant => Self::all(),
            Role::Banker => Self::none().with(TacticalPriority::AntiSeYang),
        }
    }
}

/// Result of classifying one candidate play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub rule_id: &'static str,
    pub message: &'static str,
    /// `None` for SAFE plays.
    pub tactical_context: Option<TacticalPriority>,
}

impl RiskAssessment {
    pub const SAFE_RULE_ID: &'static str = "SAFE";

    fn safe() -> Self {
        Self {
            risk_level: RiskLevel::Safe,
            rule_id: Self::SAFE_RULE_ID,
            message: "no tactical objection",
            tactical_context: None,
        }
    }
}

/// Append-only log entry for a committed PENALTY play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationRecord {
    pub player_id: PlayerId,
    pub round: u32,
    pub card: CardId,
    pub rule_id: &'static str,
    pub risk_level: RiskLevel,
    pub tactical_context: TacticalPriority,
}

impl ViolationRecord {
    /// Only PENALTY classifications produce a record.
    pub fn from_assessment(
        player_id: PlayerId,
        round: u32,
        card: CardId,
        assessment: &RiskAssessment,
    ) -> Option<Self> {
        if assessment.risk_level != RiskLevel::Penalty {
            return None;
        }
        Some(Self {
            player_id,
            round,
            card,
            rule_id: assessment.rule_id,
            risk_level: assessment.risk_level,
            tactical_context: assessment.tactical_context?,
        })
    }
}

/// Everything a rule predicate may look at.
pub struct PlayView<'a> {
    pub state: &'a RoundState,
    pub player: &'a PlayerState,
    pub card: CardId,
    pub capture: Option<Capture>,
}

impl PlayView<'_> {
    /// A play that captures nothing stays face-up on the table.
    pub fn is_lead(&self) -> bool {
        self.capture.is_none()
    }

    fn is_peasant(&self) -> bool {
        !self.player.is_banker()
    }
}

pub struct RiskRule {
    pub id: &'static str,
    pub level: RiskLevel,
    pub context: TacticalPriority,
    pub message: &'static str,
    applies: fn(&PlayView<'_>) -> bool,
}

impl RiskRule {
    pub fn applies(&self, view: &PlayView<'_>) -> bool {
        (self.applies)(view)
    }
}

/// Ordered rule set; tiers must not increase in severity down the list.
pub static RULES: [RiskRule; 6] = [
    RiskRule {
        id: "FORBIDDEN_SUIT_LEAD",
        level: RiskLevel::Penalty,
        context: TacticalPriority::AntiBanker,
        message: "leading a suit the banker opened",
        applies: forbidden_suit_lead,
    },
    RiskRule {
        id: "BAI_LAO_FEED",
        level: RiskLevel::Penalty,
        context: TacticalPriority::AntiBaiLao,
        message: "feeding a red Cash card to a suspected Bai Lao",
        applies: bai_lao_feed,
    },
    RiskRule {
        id: "SHANG_EXPOSED",
        level: RiskLevel::Warning,
        context: TacticalPriority::AntiSeYang,
        message: "exposing a Shang while an opponent is collecting them",
        applies: shang_exposed,
    },
    RiskRule {
        id: "ALLY_CAPTURE",
        level: RiskLevel::Warning,
        context: TacticalPriority::AntiBanker,
        message: "capturing a fellow peasant's card",
        applies: ally_capture,
    },
    RiskRule {
        id: "NEW_SUIT_OPEN",
        level: RiskLevel::Notice,
        context: TacticalPriority::AntiBanker,
        message: "opening a new suit",
        applies: new_suit_open,
    },
    RiskRule {
        id: "RED_CARD_LEAD",
        level: RiskLevel::Notice,
        context: TacticalPriority::AntiSeYang,
        message: "leaving a red card on the table",
        applies: red_card_lead,
    },
];

fn forbidden_suit_lead(v: &PlayView<'_>) -> bool {
    v.is_lead() && suit_status(v.state, v.player.id, v.card.suit) == SuitStatus::Forbidden
}

fn bai_lao_feed(v: &PlayView<'_>) -> bool {
    v.is_lead()
        && v.is_peasant()
        && v.card.suit == Suit::Cash
        && v.card.color() == CardColor::Red
        && v
            .state
            .players
            .iter()
            .any(|p| p.id != v.player.id && p.is_bai_lao_suspect())
}

fn shang_exposed(v: &PlayView<'_>) -> bool {
    v.is_lead()
        && v.card.is_shang()
        && v
            .state
            .players
            .iter()
            .any(|p| p.id != v.player.id && shang_count(&p.captured) >= 2)
}

fn ally_capture(v: &PlayView<'_>) -> bool {
    match v.capture {
        Some(capture) => v.is_peasant() && v.state.is_peasant(capture.victim),
        None => false,
    }
}

fn new_suit_open(v: &PlayView<'_>) -> bool {
    v.is_lead() && v.state.opened(v.card.suit).is_none()
}

fn red_card_lead(v: &PlayView<'_>) -> bool {
    v.is_lead() && v.card.color() == CardColor::Red
}

/// How `suit` stands for `player` given who opened it this round.
pub fn suit_status(state: &RoundState, player: PlayerId, suit: Suit) -> SuitStatus {
    let Some(opened) = state.opened(suit) else {
        return SuitStatus::Neutral;
    };
    if opened.leader == player {
        return SuitStatus::Safe;
    }
    let player_is_peasant = state.is_peasant(player);
    match (opened.is_banker, player_is_peasant) {
        (true, true) => SuitStatus::Forbidden,
        (false, true) => SuitStatus::Recommended,
        _ => SuitStatus::Neutral,
    }
}

/// Classify a candidate play using the player's default contexts.
pub fn assess_play(
    state: &RoundState,
    player: PlayerId,
    card: CardId,
) -> Result<RiskAssessment, DomainError> {
    let role = state.player(player)?.role;
    assess_play_with(state, player, card, TacticalSet::defaults_for(role))
}

/// Classify a candidate play against an explicit context set.
pub fn assess_play_with(
    state: &RoundState,
    player: PlayerId,
    card: CardId,
    contexts: TacticalSet,
) -> Result<RiskAssessment, DomainError> {
    let view = PlayView {
        state,
        player: state.player(player)?,
        card,
        capture: preview_capture(state, player, card),
    };

    let hit = RULES
        .iter()
        .filter(|rule| contexts.contains(rule.context))
        .find(|rule| rule.applies(&view));

    Ok(match hit {
        Some(rule) => RiskAssessment {
            risk_level: rule.level,
            rule_id: rule.id,
            message: rule.message,
            tactical_context: Some(rule.context),
        },
        None => RiskAssessment::safe(),
    })
}

/// Classify every card in a player's hand, in hand order.
pub fn assess_hand(
    state: &RoundState,
    player: PlayerId,
) -> Result<Vec<(CardId, RiskAssessment)>, DomainError> {
    let hand = &state.player(player)?.hand;
    hand.iter()
        .map(|&card| Ok((card, assess_play(state, player, card)?)))
        .collect()
}
