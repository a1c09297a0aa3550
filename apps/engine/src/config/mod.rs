pub mod scoring;

pub use scoring::{CategoryMultipliers, ScoringConfig};
