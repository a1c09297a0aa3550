//! Plays whole games of seeded rounds in memory.

use madiao_engine::ai::{create_ai, AiError, AiPlayer};
use madiao_engine::domain::{derive_ai_seed, derive_dealing_seed, Phase, PlayerId};
use madiao_engine::{
    finish_round, play_card, run_kai_chong, DomainError, PlayRequest, RoundSetup, ScoreResult,
    ScoringConfig,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

const PLAYERS: usize = 4;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub round_no: u32,
    pub banker: PlayerId,
    pub dealing_seed: u64,
    pub violations: usize,
    pub duo_jin: usize,
    pub kai_chong_matches: usize,
    pub results: Vec<ScoreResult>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub game_id: u32,
    pub game_seed: u64,
    pub rounds: Vec<RoundRecord>,
    pub final_scores: [i64; PLAYERS],
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error("unknown AI type: {0}")]
    UnknownAi(String),
}

pub struct Simulator {
    game_id: u32,
    game_seed: u64,
    rounds: u32,
    ai_type: String,
    config: ScoringConfig,
}

impl Simulator {
    pub fn new(
        game_id: u32,
        game_seed: u64,
        rounds: u32,
        ai_type: &str,
        config: ScoringConfig,
    ) -> Self {
        Self {
            game_id,
            game_seed,
            rounds,
            ai_type: ai_type.to_string(),
            config,
        }
    }

    /// One AI per seat, reseeded every round.
    fn seat_ais(&self, round_no: u32) -> Result<Vec<Box<dyn AiPlayer>>, SimError> {
        (0..PLAYERS as u8)
            .map(|seat| {
                let seed = derive_ai_seed(self.game_seed, round_no, seat);
                create_ai(&self.ai_type, Some(&serde_json::json!({ "seed": seed })))
                    .ok_or_else(|| SimError::UnknownAi(self.ai_type.clone()))
            })
            .collect()
    }

    /// Play every round; the banker seat rotates clockwise each round.
    pub fn simulate_game(&self) -> Result<GameResult, SimError> {
        let mut scores = [0i64; PLAYERS];
        let mut records = Vec::with_capacity(self.rounds as usize);

        for round_no in 1..=self.rounds {
            let banker = ((round_no - 1) as usize % PLAYERS) as PlayerId;
            let dealing_seed = derive_dealing_seed(self.game_seed, round_no);
            let mut state = RoundSetup::dealt(round_no, banker, dealing_seed)
                .with_scores(scores)
                .build()?;

            let ais = self.seat_ais(round_no)?;

            while state.phase == Phase::Playing {
                let Some(me) = state.turn else {
                    break;
                };
                let card = ais[me as usize].choose_play(&state, me)?;
                play_card(&mut state, PlayRequest::new(me, card))?;
            }

            let matches = run_kai_chong(&mut state)?;
            let violations = state.violations.len();
            let duo_jin = state.duo_jin_awards.len()
                + matches.iter().filter(|d| d.duo_jin.is_some()).count();
            let settlement = finish_round(&mut state, &self.config)?;
            scores = state.scores();

            debug!(game_id = self.game_id, round_no, scores = ?scores, "round simulated");
            records.push(RoundRecord {
                round_no,
                banker,
                dealing_seed,
                violations,
                duo_jin,
                kai_chong_matches: matches.len(),
                results: settlement.results,
            });
        }

        info!(game_id = self.game_id, final_scores = ?scores, "game simulated");
        Ok(GameResult {
            game_id: self.game_id,
            game_seed: self.game_seed,
            rounds: records,
            final_scores: scores,
        })
    }
}
