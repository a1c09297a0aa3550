//! Scripted tutorials.
//!
//! A scenario is an alternate way to build a round; its steps are replayed
//! through the same `play_card` entry point as normal play.

pub mod driver;
pub mod scenario;

pub use driver::{StepReport, TutorialDriver, HUMAN_SEAT};
pub use scenario::{
    AiMove, CapturedPreset, OpenedSuitPreset, PreconfiguredState, TutorialScenario, TutorialStep,
};
