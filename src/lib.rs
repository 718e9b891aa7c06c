//! # `find_node` - Guess the Hidden Node in a DAG
//!
//! A hidden target node is fixed in a random directed acyclic graph. A search
//! strategy repeatedly nominates a node and learns only whether the target is
//! below it, above it, unrelated to it, or the node itself. After each miss
//! the graph is pruned of everything that has been ruled out.
//!
//! ## Architecture
//!
//! 1. **Graph** ([`Graph`]): an owned adjacency map keyed by [`Node`] labels.
//!    Edge insertion rejects duplicates and anything that would close a cycle,
//!    so the graph is acyclic at all times. Node removal cascades to every
//!    incident edge.
//!
//! 2. **Generator** ([`graph::random()`]): builds layered random DAGs from
//!    [`RandomOptions`] and an injected, seedable RNG.
//!
//! 3. **Strategies** ([`Stepper`]): pure functions from the current graph to a
//!    nomination. [`BalancedStepper`] picks the node whose ancestor,
//!    descendant, and unrelated sets are most even; [`NaiveStepper`] is a
//!    structure-blind baseline.
//!
//! 4. **Driver** ([`Game`]): the elimination loop. Each step shrinks the graph
//!    by at least one node and never removes the target, so an `n`-node game
//!    ends within `n` steps.
//!
//! ## Example
//!
//! ```rust
//! use find_node::{BalancedStepper, Game, Graph, Node};
//!
//! let graph = Graph::from_edges([("A", "B"), ("B", "C"), ("C", "D"), ("D", "E")])?;
//! let mut game = Game::new(graph, Node::from("E"), BalancedStepper)?;
//! let steps = game.run()?;
//! assert!(steps < 5);
//! # Ok::<(), find_node::GraphError>(())
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod game;
pub mod graph;

pub use error::{GraphError, Result};
pub use game::{BalancedStepper, Feedback, Game, GameState, NaiveStepper, Stepper};
pub use graph::{Graph, Node, RandomOptions};
