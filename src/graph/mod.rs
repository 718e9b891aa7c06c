//! The DAG, its traversals, and random construction.
//!
//! - `dag`: the owned graph with cycle-rejecting edge insertion
//! - `traversal`: breadth-first iteration along successor edges
//! - `reach`: a bitset reachability index for scoring many nodes at once
//! - `random`: layered random DAG generation

pub mod dag;
pub mod node;
pub mod random;
pub mod reach;
pub mod traversal;

pub use dag::{AdjacencyList, Graph};
pub use node::Node;
pub use random::{random, random_seeded, RandomOptions};
pub use reach::{Partition, Reachability};
pub use traversal::Bfs;
