//! Trick & capture resolver: the only writer of hands, table and captured
//! piles during play.

use serde::Serialize;
use tracing::{debug, error, info};

use crate::domain::cards_catalog::ID_BAI_WAN;
use crate::domain::cards_logic::card_beats;
use crate::domain::cards_types::{CardId, Suit};
use crate::domain::duo_jin::{resolve_duo_jin, DuoJinInfo};
use crate::domain::risk::{assess_play, suit_status, RiskAssessment, ViolationRecord};
use crate::domain::rules::PLAYERS;
use crate::domain::special_capture::SpecialCapture;
use crate::domain::state::{
    next_player, require_turn, OpenedSuit, Phase, PlayerId, RoundState, SuitStatus, TrickCard,
};
use crate::errors::domain::{DomainError, IllegalMoveKind};

/// A request to play one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayRequest {
    pub player: PlayerId,
    pub card: CardId,
    /// Formal announcement that this play leads `suit`.
    pub declared_lead: Option<Suit>,
}

impl PlayRequest {
    pub fn new(player: PlayerId, card: CardId) -> Self {
        Self {
            player,
            card,
            declared_lead: None,
        }
    }

    pub fn declaring_lead(mut self, suit: Suit) -> Self {
        self.declared_lead = Some(suit);
        self
    }
}

/// A table card taken by a play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capture {
    pub victim: PlayerId,
    pub captured: CardId,
    pub by: CardId,
}

/// What a committed play changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    pub player: PlayerId,
    pub card: CardId,
    pub capture: Option<Capture>,
    /// Suit this play opened, if it was the suit's first play.
    pub opened_suit: Option<Suit>,
    /// Classification computed before the state changed.
    pub assessment: RiskAssessment,
    pub violation: Option<ViolationRecord>,
    pub duo_jin: Option<DuoJinInfo>,
    pub special_capture: Option<SpecialCapture>,
    /// Phase entered after this play, if any.
    pub phase_transitioned: Option<Phase>,
}

/// The oldest available table card of another player that `card` beats.
pub fn preview_capture(state: &RoundState, player: PlayerId, card: CardId) -> Option<Capture> {
    state
        .players
        .iter()
        .filter(|p| p.id != player)
        .flat_map(|p| p.trick_pile.iter().map(move |t| (p.id, t)))
        .filter(|(_, t)| t.is_available() && card_beats(card, t.card))
        .min_by_key(|(_, t)| t.seq)
        .map(|(victim, t)| Capture {
            victim,
            captured: t.card,
            by: card,
        })
}

/// The next player clockwise from `from` who still holds cards.
fn next_holder(state: &RoundState, from: PlayerId) -> Option<PlayerId> {
    let mut seat = from;
    for _ in 0..PLAYERS {
        seat = next_player(seat);
        if !state.players[seat as usize].hand.is_empty() {
            return Some(seat);
        }
    }
    None
}

/// Cards the player may play, independent of turn enforcement.
pub fn legal_plays(state: &RoundState, who: PlayerId) -> Vec<CardId> {
    if state.phase != Phase::Playing {
        return Vec::new();
    }
    let Ok(player) = state.player(who) else {
        return Vec::new();
    };
    let mut cards = player.hand.clone();
    cards.sort();
    cards
}

/// Check a request without touching state.
pub fn validate_play(state: &RoundState, req: &PlayRequest) -> Result<(), DomainError> {
    if state.phase != Phase::Playing {
        return Err(DomainError::illegal(
            IllegalMoveKind::PhaseMismatch,
            format!("cannot play during {:?}", state.phase),
        ));
    }

    let player = state.player(req.player)?;

    let turn = require_turn(state, "validate_play")?;
    if turn != req.player {
        return Err(DomainError::illegal(
            IllegalMoveKind::OutOfTurn,
            format!("player {} played on player {turn}'s turn", req.player),
        ));
    }

    if !player.hand.contains(&req.card) {
        return Err(DomainError::illegal(
            IllegalMoveKind::CardNotInHand,
            format!("{} not in player {}'s hand", req.card, req.player),
        ));
    }

    if let Some(suit) = req.declared_lead {
        if suit != req.card.suit || preview_capture(state, req.player, req.card).is_some() {
            return Err(DomainError::illegal(
                IllegalMoveKind::DeclaredLeadMismatch,
                format!("{} does not lead {suit:?}", req.card),
            ));
        }
        if suit_status(state, req.player, suit) == SuitStatus::Forbidden {
            return Err(DomainError::illegal(
                IllegalMoveKind::SuitLeadForbidden,
                format!("{suit:?} is forbidden for player {}", req.player),
            ));
        }
    }

    Ok(())
}

/// Play a card, enforcing phase, turn and hand membership.
///
/// The risk classification is taken before any mutation; a PENALTY play is
/// still committed and logged as a violation.
pub fn play_card(state: &mut RoundState, req: PlayRequest) -> Result<PlayOutcome, DomainError> {
    validate_play(state, &req)?;

    let assessment = assess_play(state, req.player, req.card)?;
    let capture = preview_capture(state, req.player, req.card);
    let round_no = state.round_no;
    let seq = state.next_seq;
    state.next_seq += 1;

    let opened_suit = if state.opened(req.card.suit).is_none() {
        let is_banker = !state.is_peasant(req.player);
        state.opened_suits.push(OpenedSuit {
            suit: req.card.suit,
            leader: req.player,
            is_banker,
        });
        debug!(round_no, player = req.player, suit = ?req.card.suit, "suit opened");
        Some(req.card.suit)
    } else {
        None
    };

    if let Some(c) = capture {
        let victim = state.player_mut(c.victim)?;
        let taken = victim
            .trick_pile
            .iter_mut()
            .find(|t| t.card == c.captured && t.is_face_up)
            .ok_or_else(|| DomainError::invariant(format!("{} vanished from table", c.captured)))?;
        taken.is_face_up = false;
    }

    let special_capture = capture.and_then(|c| SpecialCapture::classify(c.by, c.captured));

    {
        let player = state.player_mut(req.player)?;
        player.hand.retain(|&card| card != req.card);
        let mut trick = TrickCard::face_up(req.card, round_no, seq);
        match capture {
            Some(c) => {
                trick.is_face_up = false;
                player.captured.push(c.captured);
                player.captured.push(c.by);
                player.capture_count += 1;
                if let Some(kind) = special_capture {
                    player.special_captures.set(kind);
                }
            }
            None => {
                if !player.has_led {
                    player.has_led = true;
                    if req.card.suit == Suit::Cash {
                        player.is_suspected_bai_lao = true;
                    }
                }
                if req.card == ID_BAI_WAN {
                    player.is_bai_lao_revealed = true;
                }
            }
        }
        player.trick_pile.push(trick);
    }

    if let Some(c) = capture {
        info!(
            round_no,
            player = req.player,
            victim = c.victim,
            card = %c.by,
            captured = %c.captured,
            special = ?special_capture,
            "capture"
        );
    }

    let duo_jin = match capture {
        Some(c) => resolve_duo_jin(state, req.player, &[c.captured, c.by]).map(|award| {
            let info = award.info;
            state.duo_jin_awards.push(award);
            info
        }),
        None => None,
    };

    let violation = ViolationRecord::from_assessment(req.player, round_no, req.card, &assessment);
    if let Some(record) = &violation {
        info!(
            round_no,
            player = req.player,
            card = %req.card,
            rule_id = record.rule_id,
            "violation recorded"
        );
        state.violations.push(record.clone());
    }

    let mut phase_transitioned = None;
    if state.hands_empty() {
        state.phase = Phase::KaiChong;
        state.turn = None;
        phase_transitioned = Some(Phase::KaiChong);
    } else {
        state.turn = next_holder(state, req.player);
    }

    if let Err(err) = state.check_card_accounting() {
        error!(round_no, error = %err, "card accounting failed after play");
        state.abort();
        return Err(err);
    }

    Ok(PlayOutcome {
        player: req.player,
        card: req.card,
        capture,
        opened_suit,
        assessment,
        violation,
        duo_jin,
        special_capture,
        phase_transitioned,
    })
}
