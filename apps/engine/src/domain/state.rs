use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::cards_catalog::{full_deck_ids, DECK_SIZE};
use crate::domain::cards_types::{CardId, MianZhang, Suit};
use crate::domain::duo_jin::DuoJinAward;
use crate::domain::kai_chong::KaiChongDetail;
use crate::domain::risk::ViolationRecord;
use crate::domain::rules::PLAYERS;
use crate::domain::special_capture::SpecialCaptureFlags;
use crate::errors::domain::{DomainError, IllegalMoveKind};

pub type PlayerId = u8; // 0..=3

/// Round progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// No round in progress; all cards sit in the pot.
    Idle,
    /// Players take turns playing cards onto the table.
    Playing,
    /// Hands are empty; pot cards are matched against the table.
    KaiChong,
    /// Breakout resolved; waiting for settlement.
    Scoring,
    /// Round settled.
    Complete,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Banker,
    Peasant,
}

/// A played card as it sits in its player's trick pile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrickCard {
    pub card: CardId,
    pub is_face_up: bool,
    pub round: u32,
    /// Play order within the round; lower is older.
    pub seq: u32,
    pub is_kai_chong: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merit_multiplier: Option<u8>,
    /// Visually consumed by a competing Kai Chong match; still on the table.
    pub hidden: bool,
}

impl TrickCard {
    pub fn face_up(card: CardId, round: u32, seq: u32) -> Self {
        Self {
            card,
            is_face_up: true,
            round,
            seq,
            is_kai_chong: false,
            merit_multiplier: None,
            hidden: false,
        }
    }

    /// Still on the table and eligible for capture or Kai Chong.
    pub fn is_available(&self) -> bool {
        self.is_face_up && !self.hidden && !self.is_kai_chong
    }
}

/// First play of a suit this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenedSuit {
    pub suit: Suit,
    pub leader: PlayerId,
    pub is_banker: bool,
}

/// How a suit stands for a given player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuitStatus {
    Safe,
    Forbidden,
    Neutral,
    Recommended,
}

/// Per-player round state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub id: PlayerId,
    pub role: Role,
    /// Unplayed cards; shrinks monotonically within a round.
    pub hand: Vec<CardId>,
    /// Every card this player played, in play order.
    pub trick_pile: Vec<TrickCard>,
    /// Logical scoring pile; grows only within a round.
    pub captured: Vec<CardId>,
    /// Captures made this round.
    pub capture_count: u32,
    pub special_captures: SpecialCaptureFlags,
    /// Cumulative game score across rounds.
    pub score: i64,
    pub has_led: bool,
    pub is_suspected_bai_lao: bool,
    pub is_bai_lao_revealed: bool,
    pub round_diao: Option<i64>,
    pub round_score_change: Option<i64>,
    pub round_patterns: Vec<String>,
}

impl PlayerState {
    pub fn new(id: PlayerId, role: Role, score: i64) -> Self {
        Self {
            id,
            role,
            hand: Vec::new(),
            trick_pile: Vec::new(),
            captured: Vec::new(),
            capture_count: 0,
            special_captures: SpecialCaptureFlags::default(),
            score,
            has_led: false,
            is_suspected_bai_lao: false,
            is_bai_lao_revealed: false,
            round_diao: None,
            round_score_change: None,
            round_patterns: Vec::new(),
        }
    }

    pub fn is_banker(&self) -> bool {
        self.role == Role::Banker
    }

    /// Face-up cards still on the table (hidden ones included).
    pub fn table_cards(&self) -> impl Iterator<Item = &TrickCard> {
        self.trick_pile.iter().filter(|t| t.is_face_up)
    }

    pub fn is_bai_lao_suspect(&self) -> bool {
        self.is_suspected_bai_lao || self.is_bai_lao_revealed
    }
}

/// The single owned aggregate for one round. Only the turn loop mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub round_no: u32,
    pub phase: Phase,
    pub banker: PlayerId,
    /// Player expected to act; `None` outside the playing phase.
    pub turn: Option<PlayerId>,
    pub players: [PlayerState; PLAYERS],
    /// Undealt cards, in deal order.
    pub pot: Vec<CardId>,
    pub opened_suits: Vec<OpenedSuit>,
    pub mian_zhang: Option<MianZhang>,
    /// Append-only.
    pub violations: Vec<ViolationRecord>,
    /// Duo Jin triggered by captures.
    pub duo_jin_awards: Vec<DuoJinAward>,
    pub kai_chong: Vec<KaiChongDetail>,
    pub next_seq: u32,
}

impl RoundState {
    /// An idle round: no hands, every card in the pot.
    pub fn empty(round_no: u32, banker: PlayerId, scores: [i64; PLAYERS]) -> Self {
        let players = std::array::from_fn(|i| {
            let id = i as PlayerId;
            let role = if id == banker {
                Role::Banker
            } else {
                Role::Peasant
            };
            PlayerState::new(id, role, scores[i])
        });
        Self {
            round_no,
            phase: Phase::Idle,
            banker,
            turn: None,
            players,
            pot: full_deck_ids(),
            opened_suits: Vec::new(),
            mian_zhang: None,
            violations: Vec::new(),
            duo_jin_awards: Vec::new(),
            kai_chong: Vec::new(),
            next_seq: 0,
        }
    }

    /// Discard the round atomically, keeping cumulative scores.
    pub fn abort(&mut self) {
        tracing::warn!(round_no = self.round_no, "round aborted; state reset");
        *self = Self::empty(self.round_no, self.banker, self.scores());
    }

    /// Special captures made by anyone this round.
    pub fn special_captures(&self) -> SpecialCaptureFlags {
        self.players
            .iter()
            .fold(SpecialCaptureFlags::default(), |acc, p| acc.union(p.special_captures))
    }

    pub fn scores(&self) -> [i64; PLAYERS] {
        std::array::from_fn(|i| self.players[i].score)
    }

    pub fn player(&self, id: PlayerId) -> Result<&PlayerState, DomainError> {
        self.players.get(id as usize).ok_or_else(|| {
            DomainError::illegal(IllegalMoveKind::UnknownPlayer, format!("player {id}"))
        })
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut PlayerState, DomainError> {
        self.players.get_mut(id as usize).ok_or_else(|| {
            DomainError::illegal(IllegalMoveKind::UnknownPlayer, format!("player {id}"))
        })
    }

    pub fn is_peasant(&self, id: PlayerId) -> bool {
        id != self.banker
    }

    /// Every face-up table card with its owner, oldest first.
    pub fn table_cards(&self) -> Vec<(PlayerId, &TrickCard)> {
        let mut cards: Vec<(PlayerId, &TrickCard)> = self
            .players
            .iter()
            .flat_map(|p| p.table_cards().map(move |t| (p.id, t)))
            .collect();
        cards.sort_by_key(|(_, t)| t.seq);
        cards
    }

    pub fn opened(&self, suit: Suit) -> Option<&OpenedSuit> {
        self.opened_suits.iter().find(|o| o.suit == suit)
    }

    pub fn hands_empty(&self) -> bool {
        self.players.iter().all(|p| p.hand.is_empty())
    }

    /// Hands, captured piles, face-up table cards and pot must together be
    /// exactly the 40-card deck.
    pub fn check_card_accounting(&self) -> Result<(), DomainError> {
        let mut seen = BTreeSet::new();
        let mut total = 0usize;
        let zones = self
            .players
            .iter()
            .flat_map(|p| {
                p.hand
                    .iter()
                    .chain(p.captured.iter())
                    .chain(p.table_cards().map(|t| &t.card))
            })
            .chain(self.pot.iter());
        for card in zones {
            total += 1;
            if !seen.insert(*card) {
                return Err(DomainError::invariant(format!(
                    "card {card} appears in more than one zone"
                )));
            }
        }
        if total != DECK_SIZE {
            return Err(DomainError::invariant(format!(
                "{total} cards accounted for, expected {DECK_SIZE}"
            )));
        }
        Ok(())
    }
}

/// Seat / turn math helpers (4 fixed seats: 0..=3).
///
/// Clockwise direction is positive (+1).
#[inline]
pub fn seat_offset(seat: PlayerId, delta: i8) -> PlayerId {
    let seat_i = seat as i16;
    let delta_i = delta as i16;
    ((seat_i + delta_i).rem_euclid(PLAYERS as i16)) as PlayerId
}

/// Returns the next player clockwise (0 → 1 → 2 → 3 → 0).
#[inline]
pub fn next_player(p: PlayerId) -> PlayerId {
    seat_offset(p, 1)
}

/// Clockwise distance from `start` to `p` (0 when equal).
#[inline]
pub fn seats_from(start: PlayerId, p: PlayerId) -> u8 {
    ((p as i16 - start as i16).rem_euclid(PLAYERS as i16)) as u8
}

pub fn require_turn(state: &RoundState, ctx: &'static str) -> Result<PlayerId, DomainError> {
    state.turn.ok_or_else(|| {
        DomainError::invariant(format!("turn must be set while playing ({ctx})"))
    })
}
