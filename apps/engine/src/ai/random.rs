//! Random AI player: picks uniformly among the least risky cards.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{AiError, AiPlayer};
use crate::domain::{assess_hand, CardId, PlayerId, RoundState};

/// Seedable baseline AI.
///
/// Asks the risk assessor about every card in hand, keeps the cards with the
/// lowest risk level, and picks one of them at random.
pub struct RandomPlayer {
    /// `AiPlayer` methods take `&self`; the RNG needs mutable access.
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";

    /// `Some(seed)` for reproducible play, `None` for OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl AiPlayer for RandomPlayer {
    fn choose_play(&self, state: &RoundState, me: PlayerId) -> Result<CardId, AiError> {
        let assessed = assess_hand(state, me)?;
        let Some(lowest) = assessed.iter().map(|(_, a)| a.risk_level).min() else {
            return Err(AiError::InvalidMove("No legal plays available".into()));
        };
        let mut safest: Vec<CardId> = assessed
            .iter()
            .filter(|(_, a)| a.risk_level == lowest)
            .map(|(c, _)| *c)
            .collect();
        safest.sort();

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;

        safest
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| AiError::Internal("Failed to choose random card".into()))
    }
}
