//! Round simulator CLI - plays seeded Ma Diao games with the random
//! baseline AI and writes per-round settlements.

mod output;
mod simulator;
mod types;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use madiao_engine::telemetry::{init_tracing, LogFormat};
use madiao_engine::ScoringConfig;
use output::OutputWriter;
use simulator::Simulator;
use tracing::{info, warn};
use types::OutputFormat;

#[derive(Parser)]
#[command(name = "round-simulator")]
#[command(about = "Plays seeded Ma Diao games in memory")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Rounds per game
    #[arg(short, long, default_value = "4")]
    rounds: u32,

    /// AI type for every seat
    #[arg(long, default_value = "random")]
    ai: String,

    /// Game seed; game N uses seed + N - 1. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON logs instead of compact lines
    #[arg(long)]
    json_logs: bool,

    /// Print a per-seat summary to stderr
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default, only show warnings/errors
    let filter = if args.verbose { "debug" } else { "warn" };
    let format = if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    init_tracing(filter, format);

    let config = ScoringConfig::from_env()?;
    let base_seed = args.seed.unwrap_or_else(rand::random);
    info!(games = args.games, rounds = args.rounds, base_seed, "starting simulator");

    let mut writer = OutputWriter::new(args.output.as_deref(), args.output_format)?;
    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0u32;

    for game_id in 1..=args.games {
        let game_seed = base_seed.wrapping_add(u64::from(game_id - 1));
        match Simulator::new(game_id, game_seed, args.rounds, &args.ai, config).simulate_game() {
            Ok(game) => {
                results.push(game.final_scores);
                writer.write_game(game)?;
            }
            Err(e) => {
                errors += 1;
                warn!(game_id, game_seed, error = %e, "game failed");
            }
        }
    }

    if let Some(path) = writer.output_path() {
        info!("Results written to: {}", path.display());
    }
    writer.finish()?;

    if args.summary {
        print_summary(&results, errors, start.elapsed(), args.games);
    }
    Ok(())
}

fn print_summary(
    results: &[[i64; 4]],
    errors: u32,
    elapsed: std::time::Duration,
    total: u32,
) {
    eprintln!("\n=== Simulation Summary ===");
    eprintln!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        eprintln!("Errors: {errors}");
    }
    eprintln!("Total time: {elapsed:?}");
    if results.is_empty() {
        return;
    }

    let mut wins = [0u32; 4];
    let mut totals = [0i64; 4];
    for scores in results {
        let best = scores.iter().max().copied().unwrap_or(0);
        for (seat, &score) in scores.iter().enumerate() {
            totals[seat] += score;
            if score == best {
                wins[seat] += 1;
            }
        }
    }

    eprintln!("\n=== Results by Seat ===");
    for seat in 0..4 {
        let avg = totals[seat] as f64 / results.len() as f64;
        let win_rate = f64::from(wins[seat]) / results.len() as f64 * 100.0;
        eprintln!(
            "Seat {seat}: avg={avg:.1}, wins={} ({win_rate:.1}%)",
            wins[seat]
        );
    }
}
