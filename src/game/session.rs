//! Whole games from a seed: generate a graph, hide a target, play it out.
//!
//! Every game owns its graph, so batches can run in parallel with the
//! `parallel` feature without any shared mutable state.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{GraphError, Result};
use crate::game::{Game, Stepper};
use crate::graph::{random, RandomOptions};

/// Settings for a batch of games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    /// Shape of every generated graph.
    pub graph: RandomOptions,
    /// Draw a fresh edge probability per game instead of using `graph.percent`.
    pub random_percent: bool,
    /// Number of games to play.
    pub games: usize,
    /// Seed of the first game; game `i` uses `seed + i`.
    pub seed: u64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            graph: RandomOptions::benchmark(),
            random_percent: true,
            games: 1,
            seed: 0,
        }
    }
}

/// The outcome of one game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Seed the game was generated from.
    pub seed: u64,
    /// Edge probability the graph was generated with.
    pub percent: f64,
    /// Nodes in the generated graph.
    pub nodes: usize,
    /// Edges in the generated graph.
    pub edges: usize,
    /// The hidden target.
    pub target: String,
    /// Missed nominations before the target was found.
    pub steps: usize,
}

/// Aggregate statistics over a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of games played.
    pub games: usize,
    /// Sum of steps over all games.
    pub total_steps: usize,
    /// Mean steps per game (zero for an empty batch).
    pub mean_steps: f64,
    /// Worst game.
    pub max_steps: usize,
}

impl Summary {
    /// Summarizes a set of reports.
    pub fn from_reports(reports: &[Report]) -> Self {
        let games = reports.len();
        let total_steps: usize = reports.iter().map(|r| r.steps).sum();
        let max_steps = reports.iter().map(|r| r.steps).max().unwrap_or(0);
        let mean_steps = if games == 0 {
            0.0
        } else {
            total_steps as f64 / games as f64
        };
        Self {
            games,
            total_steps,
            mean_steps,
            max_steps,
        }
    }
}

/// Every report of a batch plus its summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Batch {
    /// Per-game reports, in seed order.
    pub reports: Vec<Report>,
    /// Aggregate statistics.
    pub summary: Summary,
}

/// Plays one game whose every random choice derives from `seed`.
pub fn drive<S: Stepper>(options: &SessionOptions, stepper: S, seed: u64) -> Result<Report> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut shape = options.graph.clone();
    if options.random_percent {
        shape.percent = rng.random::<f64>();
    }
    let graph = random(&shape, &mut rng)?;

    let (nodes, edges) = (graph.node_count(), graph.edge_count());
    if nodes == 0 {
        return Err(GraphError::EmptyGraph);
    }
    let target = graph
        .nodes()
        .nth(rng.random_range(0..nodes))
        .cloned()
        .ok_or(GraphError::EmptyGraph)?;

    let mut game = Game::new(graph, target.clone(), stepper)?;
    let steps = game.run()?;

    Ok(Report {
        seed,
        percent: shape.percent,
        nodes,
        edges,
        target: target.to_string(),
        steps,
    })
}

/// Plays `options.games` independent games and summarizes them.
///
/// The first failing game aborts the batch.
pub fn run_many<S: Stepper + Sync>(options: &SessionOptions, stepper: &S) -> Result<Batch> {
    let seeds = (0..options.games as u64).map(|i| options.seed.wrapping_add(i));

    #[cfg(feature = "parallel")]
    let reports: Vec<Report> = {
        use rayon::prelude::*;
        seeds
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|seed| drive(options, stepper, seed))
            .collect::<Result<_>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let reports: Vec<Report> = seeds
        .map(|seed| drive(options, stepper, seed))
        .collect::<Result<_>>()?;

    let summary = Summary::from_reports(&reports);
    info!(
        games = summary.games,
        mean_steps = summary.mean_steps,
        max_steps = summary.max_steps,
        "batch finished"
    );
    Ok(Batch { reports, summary })
}
