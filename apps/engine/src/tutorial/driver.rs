//! Replays a tutorial scenario against the engine.

use std::collections::BTreeSet;

use tracing::{debug, info};

use super::scenario::{TutorialScenario, TutorialStep};
use crate::domain::rules::PLAYERS;
use crate::domain::special_capture::SpecialCaptureFlags;
use crate::domain::state::{next_player, OpenedSuit};
use crate::domain::{
    play_card, CardId, Phase, PlayOutcome, PlayRequest, PlayerId, RoundSetup, RoundState,
};
use crate::errors::domain::DomainError;

/// The learner always sits in seat 0.
pub const HUMAN_SEAT: PlayerId = 0;

/// What one step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step_id: String,
    pub message: String,
    pub highlight_card_ids: Vec<CardId>,
    pub wait_for_click: bool,
    /// Forced card first, then scripted AI moves.
    pub outcomes: Vec<PlayOutcome>,
}

pub struct TutorialDriver {
    scenario: TutorialScenario,
    state: RoundState,
    next_step: usize,
}

impl TutorialDriver {
    pub fn new(scenario: TutorialScenario) -> Result<Self, DomainError> {
        let state = build_round(&scenario)?;
        info!(scenario = %scenario.id, steps = scenario.steps.len(), "tutorial loaded");
        Ok(Self {
            scenario,
            state,
            next_step: 0,
        })
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Mutable access for a caller that continues past the script
    /// (for example into Kai Chong and settlement).
    pub fn state_mut(&mut self) -> &mut RoundState {
        &mut self.state
    }

    pub fn current_step(&self) -> Option<&TutorialStep> {
        self.scenario.steps.get(self.next_step)
    }

    pub fn is_finished(&self) -> bool {
        self.next_step >= self.scenario.steps.len()
    }

    /// Execute the next step.
    pub fn advance(&mut self) -> Result<StepReport, DomainError> {
        let step = self
            .scenario
            .steps
            .get(self.next_step)
            .cloned()
            .ok_or_else(|| DomainError::invalid_setup("tutorial has no more steps"))?;
        debug!(step = %step.id, "tutorial step");

        if step.clear_captured_cards {
            clear_captured(&mut self.state);
        }
        if let Some(hand) = &step.set_player_hand {
            replace_hand(&mut self.state, HUMAN_SEAT, hand)?;
        }
        if let Some(hands) = &step.set_ai_hands {
            for (&seat, hand) in hands {
                replace_hand(&mut self.state, seat, hand)?;
            }
        }
        if step.clear_captured_cards || step.set_player_hand.is_some() || step.set_ai_hands.is_some()
        {
            resume_play(&mut self.state, self.scenario.starting_player_id);
            self.state
                .check_card_accounting()
                .map_err(|e| DomainError::invalid_setup(e.to_string()))?;
        }

        let mut outcomes = Vec::new();
        if let Some(card) = step.forced_card_id {
            outcomes.push(play_card(
                &mut self.state,
                PlayRequest::new(HUMAN_SEAT, card),
            )?);
        }
        for m in &step.ai_moves {
            outcomes.push(play_card(
                &mut self.state,
                PlayRequest::new(m.player_id, m.card_id),
            )?);
        }

        self.next_step += 1;
        Ok(StepReport {
            step_id: step.id,
            message: step.message,
            highlight_card_ids: step.highlight_card_ids,
            wait_for_click: step.wait_for_click,
            outcomes,
        })
    }
}

fn build_round(scenario: &TutorialScenario) -> Result<RoundState, DomainError> {
    let mut hands: [Vec<CardId>; PLAYERS] = Default::default();
    hands[HUMAN_SEAT as usize] = scenario.player_hand_ids.clone();
    for (&seat, hand) in &scenario.ai_hand_ids {
        if seat == HUMAN_SEAT || seat as usize >= PLAYERS {
            return Err(DomainError::invalid_setup(format!(
                "AI hand for seat {seat}"
            )));
        }
        hands[seat as usize] = hand.clone();
    }

    let mut setup = RoundSetup::explicit(1, scenario.banker_id, hands);
    if let Some(start) = scenario.starting_player_id {
        setup = setup.with_starting_player(start);
    }
    for preset in &scenario.initial_captured_cards {
        setup = setup.with_captured(preset.player_id, preset.card_ids.clone());
    }
    for o in &scenario.preconfigured_state.opened_suits {
        setup = setup.with_opened_suit(OpenedSuit {
            suit: o.suit,
            leader: o.leader_id,
            is_banker: o.is_banker,
        });
    }
    setup.build()
}

/// Return every captured card to the pot and drop the face-down trick
/// cards that went with them. Anything earned by those captures goes too.
fn clear_captured(state: &mut RoundState) {
    let mut returned = Vec::new();
    for player in state.players.iter_mut() {
        returned.append(&mut player.captured);
        player.trick_pile.retain(|t| t.is_face_up);
        player.capture_count = 0;
        player.special_captures = SpecialCaptureFlags::default();
    }
    state.pot.extend(returned);
    state.duo_jin_awards.clear();
}

/// Put `seat`'s hand back in the pot and deal it `cards`, taken from the
/// pot or from other hands.
fn replace_hand(
    state: &mut RoundState,
    seat: PlayerId,
    cards: &[CardId],
) -> Result<(), DomainError> {
    let old = std::mem::take(&mut state.player_mut(seat)?.hand);
    state.pot.extend(old);

    let unique: BTreeSet<CardId> = cards.iter().copied().collect();
    if unique.len() != cards.len() {
        return Err(DomainError::invalid_setup(format!(
            "duplicate card in hand override for seat {seat}"
        )));
    }

    for &card in cards {
        if let Some(pos) = state.pot.iter().position(|&c| c == card) {
            state.pot.remove(pos);
        } else if let Some(holder) = state.players.iter_mut().find(|p| p.hand.contains(&card)) {
            holder.hand.retain(|&c| c != card);
        } else {
            return Err(DomainError::invalid_setup(format!(
                "{card} is not available for seat {seat}"
            )));
        }
    }
    state.player_mut(seat)?.hand = cards.to_vec();
    Ok(())
}

/// After hands changed, make sure the round can continue.
fn resume_play(state: &mut RoundState, starting: Option<PlayerId>) {
    if state.hands_empty() {
        return;
    }
    if state.phase == Phase::KaiChong {
        state.phase = Phase::Playing;
    }
    let holds = |s: PlayerId| !state.players[s as usize].hand.is_empty();
    if state.turn.is_some_and(|s| holds(s)) {
        return;
    }
    let mut seat = state.turn.or(starting).unwrap_or(state.banker);
    let mut found = None;
    for _ in 0..PLAYERS {
        if holds(seat) {
            found = Some(seat);
            break;
        }
        seat = next_player(seat);
    }
    state.turn = found;
}
