//! Tutorial scenario documents (JSON, camelCase).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{CardId, PlayerId, Suit};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenedSuitPreset {
    pub suit: Suit,
    pub leader_id: PlayerId,
    pub is_banker: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreconfiguredState {
    #[serde(default)]
    pub opened_suits: Vec<OpenedSuitPreset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedPreset {
    pub player_id: PlayerId,
    pub card_ids: Vec<CardId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiMove {
    pub player_id: PlayerId,
    pub card_id: CardId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialStep {
    pub id: String,
    #[serde(default)]
    pub message: String,
    /// Card the human seat must play.
    #[serde(default)]
    pub forced_card_id: Option<CardId>,
    #[serde(default)]
    pub wait_for_click: bool,
    #[serde(default)]
    pub highlight_card_ids: Vec<CardId>,
    /// Played in order after the forced card.
    #[serde(default)]
    pub ai_moves: Vec<AiMove>,
    #[serde(default)]
    pub set_player_hand: Option<Vec<CardId>>,
    #[serde(default)]
    pub set_ai_hands: Option<BTreeMap<PlayerId, Vec<CardId>>>,
    #[serde(default)]
    pub clear_captured_cards: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialScenario {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub player_hand_ids: Vec<CardId>,
    /// Seats 1..=3.
    #[serde(default)]
    pub ai_hand_ids: BTreeMap<PlayerId, Vec<CardId>>,
    pub banker_id: PlayerId,
    #[serde(default)]
    pub starting_player_id: Option<PlayerId>,
    #[serde(default)]
    pub preconfigured_state: PreconfiguredState,
    #[serde(default)]
    pub initial_captured_cards: Vec<CapturedPreset>,
    #[serde(default)]
    pub steps: Vec<TutorialStep>,
}

impl TutorialScenario {
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json)
            .map_err(|e| DomainError::invalid_setup(format!("tutorial scenario: {e}")))
    }
}
