//! AI player trait definition.

use thiserror::Error;

use crate::domain::{CardId, PlayerId, RoundState};
use crate::errors::domain::DomainError;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI internal error: {0}")]
    Internal(String),
    /// No card could be chosen.
    #[error("AI invalid move: {0}")]
    InvalidMove(String),
}

impl From<DomainError> for AiError {
    fn from(err: DomainError) -> Self {
        AiError::Internal(format!("engine error: {err}"))
    }
}

/// Trait for AI players.
///
/// The engine does not say how an AI weighs risk; implementations query
/// [`assess_hand`](crate::domain::assess_hand) and decide for themselves.
pub trait AiPlayer: Send + Sync {
    /// Choose a card from `me`'s hand.
    fn choose_play(&self, state: &RoundState, me: PlayerId) -> Result<CardId, AiError>;
}
