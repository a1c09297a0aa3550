//! Domain-level error type used across the engine.
//!
//! Every engine operation either returns a value or one of these errors.
//! Risk violations are not errors: they are recorded as data and flow into
//! settlement.

use thiserror::Error;

/// Why a play request was rejected before any state mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IllegalMoveKind {
    PhaseMismatch,
    OutOfTurn,
    CardNotInHand,
    UnknownPlayer,
    DeclaredLeadMismatch,
    SuitLeadForbidden,
}

/// Central domain error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Rejected play; recoverable, the caller re-prompts.
    #[error("illegal move {0:?}: {1}")]
    IllegalMove(IllegalMoveKind, String),
    /// Card accounting no longer reconciles; the round has been aborted.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    #[error("parse card: {0}")]
    ParseCard(String),
    /// Round or scenario construction that cannot describe a legal round.
    #[error("invalid setup: {0}")]
    InvalidSetup(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl DomainError {
    pub fn illegal(kind: IllegalMoveKind, detail: impl Into<String>) -> Self {
        Self::IllegalMove(kind, detail.into())
    }
    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::InvariantViolation(detail.into())
    }
    pub fn parse_card(detail: impl Into<String>) -> Self {
        Self::ParseCard(detail.into())
    }
    pub fn invalid_setup(detail: impl Into<String>) -> Self {
        Self::InvalidSetup(detail.into())
    }
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config(detail.into())
    }

    /// The illegal-move kind, if this is a rejected play.
    pub fn illegal_kind(&self) -> Option<IllegalMoveKind> {
        match self {
            DomainError::IllegalMove(kind, _) => Some(*kind),
            _ => None,
        }
    }
}
