//! Nomination strategies.
//!
//! A [`Stepper`] sees only the current graph, never the hidden target, and
//! must name a node that is currently in the graph. Steppers take `&self`, so
//! a nomination can depend on nothing but the graph it is shown.

use crate::error::{GraphError, Result};
use crate::graph::{Graph, Node, Reachability};

/// Chooses the next node to query.
pub trait Stepper {
    /// Returns a node present in `graph`, or [`GraphError::EmptyGraph`] if
    /// there is none.
    fn step(&self, graph: &Graph) -> Result<Node>;
}

impl<S: Stepper + ?Sized> Stepper for &S {
    fn step(&self, graph: &Graph) -> Result<Node> {
        (**self).step(graph)
    }
}

impl<S: Stepper + ?Sized> Stepper for Box<S> {
    fn step(&self, graph: &Graph) -> Result<Node> {
        (**self).step(graph)
    }
}

/// Nominates the node whose ancestor, descendant, and unrelated sets are most
/// evenly sized.
///
/// The score of a node is the size of its largest part; the lowest score wins.
/// Ties go to the node with the larger `ancestors * descendants` product,
/// which is proportional to the expected number of nodes pruned besides the
/// nominee when the target is uniform over the graph, and then to the smaller
/// label.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalancedStepper;

impl Stepper for BalancedStepper {
    fn step(&self, graph: &Graph) -> Result<Node> {
        let reach = Reachability::new(graph);
        reach
            .partitions()
            .min_by(|(a_node, a), (b_node, b)| {
                a.largest()
                    .cmp(&b.largest())
                    .then_with(|| (b.ancestors * b.descendants).cmp(&(a.ancestors * a.descendants)))
                    .then_with(|| a_node.cmp(b_node))
            })
            .map(|(node, _)| node.clone())
            .ok_or(GraphError::EmptyGraph)
    }
}

/// Always nominates the greatest label.
///
/// Ignores structure entirely; useful as a worst-case baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveStepper;

impl Stepper for NaiveStepper {
    fn step(&self, graph: &Graph) -> Result<Node> {
        graph.nodes().next_back().cloned().ok_or(GraphError::EmptyGraph)
    }
}
