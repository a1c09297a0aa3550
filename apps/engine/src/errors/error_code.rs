//! Stable error codes for the Ma Diao engine.
//!
//! Presentation layers map these to localized messages. Add new codes here;
//! never pass ad-hoc strings as error codes.

use core::fmt;

use super::domain::{DomainError, IllegalMoveKind};

/// Centralized error codes.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Illegal moves
    /// Play attempted outside the playing phase
    PhaseMismatch,
    /// Play attempted out of turn
    OutOfTurn,
    /// Card not in the player's hand
    CardNotInHand,
    /// Player id outside 0..=3
    UnknownPlayer,
    /// Declared lead does not describe the play
    DeclaredLeadMismatch,
    /// Declared lead names a forbidden suit
    SuitLeadForbidden,

    // Engine failures
    /// Card accounting failed; round aborted
    InvariantViolation,
    /// Card token could not be parsed
    ParseCard,
    /// Round or scenario setup is inconsistent
    InvalidSetup,
    /// Configuration value rejected
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::UnknownPlayer => "UNKNOWN_PLAYER",
            Self::DeclaredLeadMismatch => "DECLARED_LEAD_MISMATCH",
            Self::SuitLeadForbidden => "SUIT_LEAD_FORBIDDEN",
            Self::InvariantViolation => "INVARIANT_VIOLATION",
            Self::ParseCard => "PARSE_CARD",
            Self::InvalidSetup => "INVALID_SETUP",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Whether the caller can recover by re-prompting the player.
    pub const fn is_recoverable(self) -> bool {
        matches!(
            self,
            Self::PhaseMismatch
                | Self::OutOfTurn
                | Self::CardNotInHand
                | Self::UnknownPlayer
                | Self::DeclaredLeadMismatch
                | Self::SuitLeadForbidden
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<IllegalMoveKind> for ErrorCode {
    fn from(kind: IllegalMoveKind) -> Self {
        match kind {
            IllegalMoveKind::PhaseMismatch => Self::PhaseMismatch,
            IllegalMoveKind::OutOfTurn => Self::OutOfTurn,
            IllegalMoveKind::CardNotInHand => Self::CardNotInHand,
            IllegalMoveKind::UnknownPlayer => Self::UnknownPlayer,
            IllegalMoveKind::DeclaredLeadMismatch => Self::DeclaredLeadMismatch,
            IllegalMoveKind::SuitLeadForbidden => Self::SuitLeadForbidden,
        }
    }
}

impl From<&DomainError> for ErrorCode {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::IllegalMove(kind, _) => (*kind).into(),
            DomainError::InvariantViolation(_) => Self::InvariantViolation,
            DomainError::ParseCard(_) => Self::ParseCard,
            DomainError::InvalidSetup(_) => Self::InvalidSetup,
            DomainError::Config(_) => Self::ConfigError,
        }
    }
}
