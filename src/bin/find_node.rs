//! Plays guess-the-node games on random DAGs and reports how many steps each took.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use find_node::game::{run_many, Batch, SessionOptions, Stepper};
use find_node::{BalancedStepper, NaiveStepper};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    Balanced,
    Naive,
}

#[derive(Debug, Parser)]
#[command(name = "find_node", about = "Find a hidden node in a random DAG")]
struct Cli {
    /// JSON file with session options; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed of the first game.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of games to play.
    #[arg(long)]
    games: Option<usize>,

    /// Fixed edge probability; otherwise drawn per game.
    #[arg(long)]
    percent: Option<f64>,

    /// Nomination strategy.
    #[arg(long, value_enum, default_value_t = Strategy::Balanced)]
    strategy: Strategy,

    /// Print the full batch as JSON.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let mut options = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<SessionOptions>(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SessionOptions::default(),
    };
    if let Some(seed) = cli.seed {
        options.seed = seed;
    }
    if let Some(games) = cli.games {
        options.games = games;
    }
    if let Some(percent) = cli.percent {
        options.graph.percent = percent;
        options.random_percent = false;
    }

    let batch = match cli.strategy {
        Strategy::Balanced => play(&options, &BalancedStepper),
        Strategy::Naive => play(&options, &NaiveStepper),
    }?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&batch)?);
    } else {
        for report in &batch.reports {
            println!("Found target node in {} steps! (seed {}, {} nodes)", report.steps, report.seed, report.nodes);
        }
        if batch.summary.games > 1 {
            println!(
                "{} games: mean {:.2} steps, worst {}",
                batch.summary.games, batch.summary.mean_steps, batch.summary.max_steps
            );
        }
    }
    Ok(())
}

fn play<S: Stepper + Sync>(options: &SessionOptions, stepper: &S) -> Result<Batch> {
    run_many(options, stepper).context("game failed")
}
