#![allow(dead_code)]

use madiao_engine::ai::{AiPlayer, RandomPlayer};
use madiao_engine::domain::fixtures::CardFixtures;
use madiao_engine::domain::{CardId, Phase};
use madiao_engine::{play_card, run_kai_chong, PlayRequest, RoundState};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    engine_test_support::logging::init();
}

pub fn cards(tokens: &[&str]) -> Vec<CardId> {
    CardFixtures::parse_hardcoded(tokens)
}

pub fn card(token: &str) -> CardId {
    CardFixtures::one(token)
}

/// Play every hand out with seeded random AIs, then run the breakout.
pub fn play_out(state: &mut RoundState, ai_seed: u64) {
    let ais: Vec<RandomPlayer> = (0..4)
        .map(|seat| RandomPlayer::new(Some(ai_seed.wrapping_add(seat))))
        .collect();
    while state.phase == Phase::Playing {
        let me = state.turn.expect("turn set while playing");
        let choice = ais[me as usize]
            .choose_play(state, me)
            .expect("AI has a card");
        play_card(state, PlayRequest::new(me, choice)).expect("AI play is legal");
    }
    run_kai_chong(state).expect("breakout after play");
}

pub fn proptest_config() -> proptest::prelude::ProptestConfig {
    let cases: u32 = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(16)
        .max(1);

    proptest::prelude::ProptestConfig {
        // Disable persistence to silence regression-file warnings in integration tests
        failure_persistence: None,
        cases,
        ..proptest::prelude::ProptestConfig::default()
    }
}
