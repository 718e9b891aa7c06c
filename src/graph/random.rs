//! Random layered DAG generation.
//!
//! Nodes are created in ranks. Every node of every earlier rank is wired to
//! every node of the new rank independently with probability `percent`, so
//! edges only point from older labels to newer ones. The graph's own cycle
//! check still runs on every insertion; here it must never fire.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{GraphError, Result};
use crate::graph::{Graph, Node};

/// Shape parameters for [`random`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomOptions {
    /// Fewest nodes per rank (how fat the DAG is).
    pub min_per_rank: usize,
    /// Most nodes per rank.
    pub max_per_rank: usize,
    /// Fewest ranks (how tall the DAG is).
    pub min_ranks: usize,
    /// Most ranks.
    pub max_ranks: usize,
    /// Probability of each forward edge.
    pub percent: f64,
}

impl Default for RandomOptions {
    fn default() -> Self {
        Self {
            min_per_rank: 1,
            max_per_rank: 5,
            min_ranks: 3,
            max_ranks: 5,
            percent: 0.3,
        }
    }
}

impl RandomOptions {
    /// The shape used for benchmark games: 15-20 nodes per rank, 8-10 ranks.
    pub fn benchmark() -> Self {
        Self {
            min_per_rank: 15,
            max_per_rank: 20,
            min_ranks: 8,
            max_ranks: 10,
            ..Self::default()
        }
    }

    /// Checks every range constraint.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(GraphError::InvalidConfig(msg));

        if self.min_per_rank == 0 || self.min_ranks == 0 {
            return invalid(format!(
                "min_per_rank ({}) and min_ranks ({}) must be positive",
                self.min_per_rank, self.min_ranks
            ));
        }
        if self.min_per_rank > self.max_per_rank {
            return invalid(format!(
                "min_per_rank ({}) exceeds max_per_rank ({})",
                self.min_per_rank, self.max_per_rank
            ));
        }
        if self.min_ranks > self.max_ranks {
            return invalid(format!(
                "min_ranks ({}) exceeds max_ranks ({})",
                self.min_ranks, self.max_ranks
            ));
        }
        if !(0.0..=1.0).contains(&self.percent) {
            return invalid(format!("percent ({}) must lie in [0, 1]", self.percent));
        }
        Ok(())
    }
}

/// Builds a random layered DAG, drawing every choice from `rng`.
///
/// Rank count and per-rank node counts are drawn inclusively from their
/// ranges. Labels are consecutive integers in creation order. Any insertion
/// failure aborts generation.
pub fn random<R: Rng + ?Sized>(options: &RandomOptions, rng: &mut R) -> Result<Graph> {
    options.validate()?;

    let mut graph = Graph::new();
    let ranks = rng.random_range(options.min_ranks..=options.max_ranks);
    let mut nodes = 0usize;
    for _ in 0..ranks {
        let new_nodes = rng.random_range(options.min_per_rank..=options.max_per_rank);
        for k in nodes..nodes + new_nodes {
            graph.add_node(k)?;
        }
        for j in 0..nodes {
            for k in nodes..nodes + new_nodes {
                if rng.random_bool(options.percent) {
                    graph.add_edge(Node::from(j), Node::from(k))?;
                }
            }
        }
        nodes += new_nodes;
    }

    info!(
        ranks,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "generated random dag"
    );
    Ok(graph)
}

/// Builds a random layered DAG from a seeded [`StdRng`].
pub fn random_seeded(options: &RandomOptions, seed: u64) -> Result<Graph> {
    random(options, &mut StdRng::seed_from_u64(seed))
}
