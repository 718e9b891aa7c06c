//! Error types for graph and game operations.

use thiserror::Error;

use crate::graph::Node;

/// Result type alias for graph and game operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Every way a graph mutation, a strategy, or the generator can fail.
///
/// All variants stem from logic or invariant violations; none are transient,
/// so callers should never retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// `add_node` on a label that is already present.
    #[error("attempted to add node {0} to graph, but it already exists")]
    DuplicateNode(Node),

    /// `add_edge` on an ordered pair that is already connected.
    #[error("{from} -> {to} already exists")]
    DuplicateEdge {
        /// Source of the rejected edge.
        from: Node,
        /// Target of the rejected edge.
        to: Node,
    },

    /// `add_edge` would close a directed cycle (a path `to -> ... -> from` exists).
    #[error("a cycle was detected when adding {from} -> {to}")]
    CycleDetected {
        /// Source of the rejected edge.
        from: Node,
        /// Target of the rejected edge.
        to: Node,
    },

    /// An operation required a node that is not in the graph.
    #[error("node {0} does not exist in the graph")]
    NodeNotFound(Node),

    /// A strategy was asked to nominate from a graph with no nodes.
    #[error("cannot nominate a node from an empty graph")]
    EmptyGraph,

    /// Generator options violate their range constraints.
    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),
}
