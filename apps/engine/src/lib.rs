#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod errors;
pub mod telemetry;
pub mod tutorial;

// Re-exports for public API
pub use config::ScoringConfig;
pub use domain::{
    finish_round, play_card, run_kai_chong, PlayRequest, RoundSetup, RoundState, ScoreResult,
    Settlement,
};
pub use errors::{DomainError, ErrorCode, IllegalMoveKind};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::logging::init();
}
