//! Shared types for the simulator.

use clap::ValueEnum;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per game, one game per line.
    Jsonl,
    /// A single pretty-printed JSON array.
    Json,
}
