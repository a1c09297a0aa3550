//! Round lifecycle: build a round, play it through the resolver, run the
//! breakout, then settle.
//!
//! Seeded deals and scripted setups (tutorials, tests) both come through
//! [`RoundSetup`], so every round reaches play through the same checks.

use std::collections::BTreeSet;

use tracing::{error, info};

use crate::config::ScoringConfig;
use crate::domain::cards_catalog::full_deck_ids;
use crate::domain::cards_types::{CardId, MianZhang};
use crate::domain::dealing::deal_round;
use crate::domain::duo_jin::seized_victim;
use crate::domain::kai_chong::won_pot_cards;
use crate::domain::patterns::{detect_patterns, PatternContext};
use crate::domain::rules::PLAYERS;
use crate::domain::settlement::{
    settle, DuoJinTransfer, PlayerRoundInput, Settlement, SettlementInput,
};
use crate::domain::state::{seat_offset, OpenedSuit, Phase, PlayerId, RoundState};
use crate::errors::domain::{DomainError, IllegalMoveKind};

/// Everything needed to start a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSetup {
    pub round_no: u32,
    pub banker: PlayerId,
    /// Defaults to the banker.
    pub starting_player: Option<PlayerId>,
    pub scores: [i64; PLAYERS],
    pub hands: [Vec<CardId>; PLAYERS],
    /// Empty means "whatever the hands and presets leave", in catalog order.
    pub pot: Vec<CardId>,
    /// Preset captured piles by seat; checked by `build`.
    pub captured: Vec<(PlayerId, Vec<CardId>)>,
    pub opened_suits: Vec<OpenedSuit>,
    pub mian_zhang: Option<MianZhang>,
}

impl RoundSetup {
    pub fn explicit(round_no: u32, banker: PlayerId, hands: [Vec<CardId>; PLAYERS]) -> Self {
        Self {
            round_no,
            banker,
            starting_player: None,
            scores: [0; PLAYERS],
            hands,
            pot: Vec::new(),
            captured: Vec::new(),
            opened_suits: Vec::new(),
            mian_zhang: None,
        }
    }

    /// A shuffled deal.
    pub fn dealt(round_no: u32, banker: PlayerId, seed: u64) -> Self {
        let deal = deal_round(seed);
        let mut setup = Self::explicit(round_no, banker, deal.hands);
        setup.pot = deal.pot;
        setup
    }

    pub fn with_scores(mut self, scores: [i64; PLAYERS]) -> Self {
        self.scores = scores;
        self
    }

    pub fn with_starting_player(mut self, player: PlayerId) -> Self {
        self.starting_player = Some(player);
        self
    }

    pub fn with_captured(mut self, player: PlayerId, cards: Vec<CardId>) -> Self {
        self.captured.push((player, cards));
        self
    }

    pub fn with_opened_suit(mut self, opened: OpenedSuit) -> Self {
        self.opened_suits.push(opened);
        self
    }

    pub fn with_mian_zhang(mut self, mian_zhang: MianZhang) -> Self {
        self.mian_zhang = Some(mian_zhang);
        self
    }

    /// Validate and produce a round in the playing phase.
    pub fn build(self) -> Result<RoundState, DomainError> {
        let seat_ok = |p: PlayerId| (p as usize) < PLAYERS;
        if !seat_ok(self.banker) {
            return Err(DomainError::invalid_setup(format!(
                "banker seat {} out of range",
                self.banker
            )));
        }
        let start = self.starting_player.unwrap_or(self.banker);
        if !seat_ok(start) {
            return Err(DomainError::invalid_setup(format!(
                "starting seat {start} out of range"
            )));
        }
        if let Some(o) = self.opened_suits.iter().find(|o| !seat_ok(o.leader)) {
            return Err(DomainError::invalid_setup(format!(
                "suit {:?} opened by unknown seat {}",
                o.suit, o.leader
            )));
        }

        if let Some((seat, _)) = self.captured.iter().find(|(seat, _)| !seat_ok(*seat)) {
            return Err(DomainError::invalid_setup(format!(
                "captured cards preset for unknown seat {seat}"
            )));
        }

        let mut state = RoundState::empty(self.round_no, self.banker, self.scores);
        for (player, hand) in state.players.iter_mut().zip(self.hands) {
            player.hand = hand;
        }
        for (seat, cards) in self.captured {
            state.players[seat as usize].captured.extend(cards);
        }

        state.pot = if self.pot.is_empty() {
            let placed: BTreeSet<CardId> = state
                .players
                .iter()
                .flat_map(|p| p.hand.iter().chain(p.captured.iter()))
                .copied()
                .collect();
            full_deck_ids()
                .into_iter()
                .filter(|c| !placed.contains(c))
                .collect()
        } else {
            self.pot
        };
        state.opened_suits = self.opened_suits;
        state.mian_zhang = self.mian_zhang;

        state
            .check_card_accounting()
            .map_err(|e| DomainError::invalid_setup(e.to_string()))?;

        state.phase = Phase::Playing;
        state.turn = (0..PLAYERS as i8)
            .map(|d| seat_offset(start, d))
            .find(|&s| !state.players[s as usize].hand.is_empty());
        if state.turn.is_none() {
            state.phase = Phase::KaiChong;
        }

        info!(
            round_no = state.round_no,
            banker = state.banker,
            turn = ?state.turn,
            "round started"
        );
        Ok(state)
    }
}

/// Gather the read-only scoring facts of a round.
pub fn settlement_input(state: &RoundState) -> SettlementInput {
    let seized = seized_victim(state).or_else(|| {
        state
            .kai_chong
            .iter()
            .find_map(|d| d.duo_jin.map(|info| info.victim_id))
    });

    let players = state
        .players
        .iter()
        .map(|p| {
            let kc_cards = won_pot_cards(&state.kai_chong, p.id);
            let ctx = PatternContext {
                mian_zhang: state.mian_zhang,
                kai_chong_cards: &kc_cards,
                brocade_seized: seized == Some(p.id),
            };
            let mut patterns = detect_patterns(&p.captured, &ctx);
            patterns.extend(
                state
                    .duo_jin_awards
                    .iter()
                    .filter(|a| a.player == p.id)
                    .map(|a| a.detail.clone()),
            );
            PlayerRoundInput {
                player_id: p.id,
                role: p.role,
                captured: p.captured.clone(),
                trick_pile: p.trick_pile.clone(),
                trick_count: p.capture_count,
                special_captures: p.special_captures,
                patterns,
                kai_chong: state
                    .kai_chong
                    .iter()
                    .filter(|d| d.player_id == p.id)
                    .cloned()
                    .collect(),
            }
        })
        .collect();

    let duo_jin = state
        .duo_jin_awards
        .iter()
        .map(|a| DuoJinTransfer {
            thief: a.player,
            info: a.info,
        })
        .chain(state.kai_chong.iter().filter_map(|d| {
            d.duo_jin.map(|info| DuoJinTransfer {
                thief: d.player_id,
                info,
            })
        }))
        .collect();

    SettlementInput {
        round_no: state.round_no,
        banker: state.banker,
        players,
        duo_jin,
        violations: state.violations.clone(),
    }
}

/// Settle a round whose breakout has run, and apply the result to the
/// players' cumulative scores.
pub fn finish_round(
    state: &mut RoundState,
    config: &ScoringConfig,
) -> Result<Settlement, DomainError> {
    if state.phase != Phase::Scoring {
        return Err(DomainError::illegal(
            IllegalMoveKind::PhaseMismatch,
            format!("cannot settle during {:?}", state.phase),
        ));
    }
    if let Err(err) = state.check_card_accounting() {
        error!(round_no = state.round_no, error = %err, "card accounting failed before settlement");
        state.abort();
        return Err(err);
    }

    let settlement = settle(&settlement_input(state), config);

    for result in &settlement.results {
        let player = state.player_mut(result.player_id)?;
        player.score += result.total_round_change;
        player.round_diao = Some(result.diao_raw_value);
        player.round_score_change = Some(result.total_round_change);
        player.round_patterns = result.patterns.clone();
    }
    state.phase = Phase::Complete;
    state.turn = None;

    info!(
        round_no = state.round_no,
        scores = ?state.scores(),
        "round complete"
    );
    Ok(settlement)
}
