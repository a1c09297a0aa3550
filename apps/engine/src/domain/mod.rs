//! Domain layer: pure Ma Diao rules and the round aggregate.

pub mod cards_catalog;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod duo_jin;
pub mod fixtures;
pub mod kai_chong;
pub mod patterns;
pub mod risk;
pub mod round_flow;
pub mod rules;
pub mod seed_derivation;
pub mod settlement;
pub mod special_capture;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod tests_duo_jin;
#[cfg(test)]
mod tests_patterns;
#[cfg(test)]
mod tests_risk;
#[cfg(test)]
mod tests_settlement;

// Re-exports for ergonomics
pub use cards_catalog::{card, full_deck, full_deck_ids, DECK_SIZE};
pub use cards_logic::{card_beats, zhu_value};
pub use cards_parsing::try_parse_cards;
pub use cards_types::{Card, CardColor, CardId, HeldCard, MianZhang, Rank, Suit};
pub use dealing::{deal_round, Deal};
pub use duo_jin::{resolve_duo_jin, DuoJinAward, DuoJinInfo, DuoJinType};
pub use kai_chong::{resolve_kai_chong, run_kai_chong, KaiChongDetail, MatchType};
pub use patterns::{detect_patterns, PatternCategory, PatternContext, PatternDetail};
pub use risk::{
    assess_hand, assess_play, suit_status, RiskAssessment, RiskLevel, TacticalPriority,
    TacticalSet, ViolationRecord,
};
pub use round_flow::{finish_round, settlement_input, RoundSetup};
pub use seed_derivation::{derive_ai_seed, derive_dealing_seed};
pub use settlement::{
    settle, NotificationCategory, ScoreNotification, ScoreResult, Settlement, SettlementInput,
};
pub use special_capture::{SpecialCapture, SpecialCaptureFlags};
pub use state::{Phase, PlayerId, PlayerState, Role, RoundState, SuitStatus, TrickCard};
pub use tricks::{legal_plays, play_card, preview_capture, validate_play, PlayOutcome, PlayRequest};
