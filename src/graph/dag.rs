//! An owned, mutable directed acyclic graph keyed by node labels.
//!
//! Acyclicity is enforced when edges are inserted: `add_edge` walks forward
//! from the target and rejects the edge if it can reach the source. Removal can
//! never introduce a cycle, so it performs no check.
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `add_node` | \(O(\log n)\) | Map insertion |
//! | `add_edge` | \(O(n + m)\) | BFS from the target for cycle detection |
//! | `remove_node` | \(O(n + m)\) | Scans every successor list |
//! | `children` | \(O(n + m)\) | Forward BFS |
//! | `parents` | \(O(n + m)\) | Reverse index, then BFS over it |
//! | `topological_sort` | \(O(n + m)\) | Kahn's algorithm |

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::ops::ControlFlow;

use tracing::trace;

use crate::error::{GraphError, Result};
use crate::graph::traversal::Bfs;
use crate::graph::Node;

/// A detached copy of a graph's successor mapping.
pub type AdjacencyList = BTreeMap<Node, Vec<Node>>;

/// A directed acyclic graph with at most one edge per ordered node pair.
///
/// Every successor stored in an adjacency list is also a key of the map, and
/// successors keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: AdjacencyList,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph by inserting each edge in order through [`Graph::add_edge`].
    ///
    /// Stops at the first rejected edge.
    pub fn from_edges<I, U, V>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (U, V)>,
        U: Into<Node>,
        V: Into<Node>,
    {
        let mut graph = Self::new();
        for (from, to) in edges {
            graph.add_edge(from, to)?;
        }
        Ok(graph)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Returns `true` if `node` is in the graph.
    pub fn contains(&self, node: &Node) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Returns `true` if the edge `from -> to` exists.
    pub fn has_edge(&self, from: &Node, to: &Node) -> bool {
        self.adjacency
            .get(from)
            .is_some_and(|succ| succ.contains(to))
    }

    /// Returns the graph's own copy of `node`'s label.
    pub(crate) fn resolve(&self, node: &Node) -> Option<&Node> {
        self.adjacency.get_key_value(node).map(|(k, _)| k)
    }

    /// Direct successors of `node` in insertion order, or `None` if absent.
    pub fn successors(&self, node: &Node) -> Option<&[Node]> {
        self.adjacency.get(node).map(Vec::as_slice)
    }

    /// The current node set.
    ///
    /// Callers must treat the order as unspecified.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &Node> + ExactSizeIterator + '_ {
        self.adjacency.keys()
    }

    /// Returns a deep copy of the successor mapping.
    ///
    /// Mutating the returned map never affects the graph.
    pub fn adjacency_list(&self) -> AdjacencyList {
        self.adjacency.clone()
    }

    /// Adds `node` with no edges.
    pub fn add_node(&mut self, node: impl Into<Node>) -> Result<()> {
        let node = node.into();
        if self.adjacency.contains_key(&node) {
            return Err(GraphError::DuplicateNode(node));
        }
        self.adjacency.insert(node, Vec::new());
        Ok(())
    }

    /// Adds the directed edge `from -> to`, creating either endpoint if absent.
    ///
    /// Fails with [`GraphError::DuplicateEdge`] if the edge exists and with
    /// [`GraphError::CycleDetected`] if `to` already reaches `from`. A rejected
    /// edge leaves the graph unchanged.
    pub fn add_edge(&mut self, from: impl Into<Node>, to: impl Into<Node>) -> Result<()> {
        let (from, to) = (from.into(), to.into());

        if from == to {
            trace!(%from, "rejected self-loop");
            return Err(GraphError::CycleDetected { from, to });
        }

        // A fresh `from` distinct from `to` has no in-edges, so nothing can
        // reach it and the edge can neither duplicate nor close a cycle.
        if !self.adjacency.contains_key(&from) {
            self.adjacency.insert(from.clone(), Vec::new());
        }

        if self.adjacency.contains_key(&to) {
            if self.has_edge(&from, &to) {
                trace!(%from, %to, "rejected duplicate edge");
                return Err(GraphError::DuplicateEdge { from, to });
            }
            let closes_cycle = self
                .breadth_first_search(&to, |node| {
                    if *node == from {
                        ControlFlow::Break(())
                    } else {
                        ControlFlow::Continue(())
                    }
                })
                .is_break();
            if closes_cycle {
                trace!(%from, %to, "rejected cyclic edge");
                return Err(GraphError::CycleDetected { from, to });
            }
        } else {
            self.adjacency.insert(to.clone(), Vec::new());
        }

        if let Some(succ) = self.adjacency.get_mut(&from) {
            succ.push(to);
        }
        Ok(())
    }

    /// Removes `node` together with every edge into or out of it.
    pub fn remove_node(&mut self, node: &Node) -> Result<()> {
        if self.adjacency.remove(node).is_none() {
            return Err(GraphError::NodeNotFound(node.clone()));
        }
        for succ in self.adjacency.values_mut() {
            succ.retain(|n| n != node);
        }
        Ok(())
    }

    /// Returns a breadth-first iterator over the nodes reachable from `start`,
    /// `start` included. Empty if `start` is absent.
    pub fn bfs<'a>(&'a self, start: &Node) -> Bfs<'a> {
        Bfs::new(self, start)
    }

    /// Walks forward from `start` in breadth-first order, calling `visit` once
    /// per reachable node (`start` first).
    ///
    /// The walk stops as soon as `visit` breaks, and the break value is
    /// returned. An absent `start` visits nothing and continues.
    pub fn breadth_first_search<B, F>(&self, start: &Node, mut visit: F) -> ControlFlow<B>
    where
        F: FnMut(&Node) -> ControlFlow<B>,
    {
        for node in self.bfs(start) {
            visit(node)?;
        }
        ControlFlow::Continue(())
    }

    /// All nodes strictly reachable from `of`.
    pub fn children(&self, of: &Node) -> BTreeSet<Node> {
        self.bfs(of).skip(1).cloned().collect()
    }

    /// All nodes that can reach `of`, excluding `of` itself.
    pub fn parents(&self, of: &Node) -> BTreeSet<Node> {
        let Some(of) = self.resolve(of) else {
            return BTreeSet::new();
        };
        let reverse = self.reverse_adjacency();

        let mut found: BTreeSet<&Node> = BTreeSet::new();
        let mut queue = VecDeque::from([of]);
        while let Some(cur) = queue.pop_front() {
            for &pred in reverse.get(cur).into_iter().flatten() {
                if found.insert(pred) {
                    queue.push_back(pred);
                }
            }
        }
        found.into_iter().cloned().collect()
    }

    /// A linear order of all nodes with `u` before `v` for every edge `u -> v`.
    ///
    /// Ties are broken by label so the order is deterministic.
    pub fn topological_sort(&self) -> Vec<Node> {
        self.topological_order().into_iter().cloned().collect()
    }

    /// Kahn's algorithm over borrowed labels.
    pub(crate) fn topological_order(&self) -> Vec<&Node> {
        let mut indeg: HashMap<&Node, usize> = self.adjacency.keys().map(|n| (n, 0)).collect();
        for succ in self.adjacency.values() {
            for v in succ {
                if let Some(d) = indeg.get_mut(v) {
                    *d += 1;
                }
            }
        }

        // Sources in label order for determinism.
        let mut queue: VecDeque<&Node> = self
            .adjacency
            .keys()
            .filter(|n| indeg.get(n) == Some(&0))
            .collect();

        let mut order = Vec::with_capacity(self.adjacency.len());
        while let Some(u) = queue.pop_front() {
            order.push(u);
            for v in self.adjacency.get(u).into_iter().flatten() {
                if let Some(d) = indeg.get_mut(v) {
                    *d -= 1;
                    if *d == 0 {
                        queue.push_back(v);
                    }
                }
            }
        }

        debug_assert_eq!(order.len(), self.adjacency.len(), "edge insertion admitted a cycle");
        order
    }

    /// Maps each node to its direct predecessors.
    fn reverse_adjacency(&self) -> HashMap<&Node, Vec<&Node>> {
        let mut reverse: HashMap<&Node, Vec<&Node>> = HashMap::with_capacity(self.adjacency.len());
        for (u, succ) in &self.adjacency {
            for v in succ {
                reverse.entry(v).or_default().push(u);
            }
        }
        reverse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(label: &str) -> Node {
        Node::from(label)
    }

    fn labels(set: &BTreeSet<Node>) -> Vec<&str> {
        set.iter().map(Node::as_str).collect()
    }

    #[test]
    fn add_node_rejects_duplicates() {
        let mut g = Graph::new();
        g.add_node("A").unwrap();
        assert!(g.contains(&node("A")));
        assert_eq!(g.add_node("A"), Err(GraphError::DuplicateNode(node("A"))));
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn add_edge_creates_missing_endpoints() {
        let mut g = Graph::new();
        g.add_edge("A", "B").unwrap();
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.successors(&node("A")), Some(&[node("B")][..]));
        assert_eq!(g.successors(&node("B")), Some(&[][..]));
    }

    #[test]
    fn add_edge_keeps_insertion_order() {
        let mut g = Graph::new();
        for i in 0..10usize {
            g.add_edge("A", i).unwrap();
        }
        let succ: Vec<&str> = g.successors(&node("A")).unwrap().iter().map(Node::as_str).collect();
        assert_eq!(succ, ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"]);
        assert_eq!(g.edge_count(), 10);
    }

    #[test]
    fn add_edge_rejects_duplicate_pair() {
        let mut g = Graph::new();
        g.add_edge("A", "B").unwrap();
        assert_eq!(
            g.add_edge("A", "B"),
            Err(GraphError::DuplicateEdge { from: node("A"), to: node("B") })
        );
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn add_edge_rejects_direct_cycle() {
        let mut g = Graph::new();
        g.add_edge("A", "B").unwrap();
        assert_eq!(
            g.add_edge("B", "A"),
            Err(GraphError::CycleDetected { from: node("B"), to: node("A") })
        );
    }

    #[test]
    fn add_edge_rejects_indirect_cycle() {
        let mut g = Graph::new();
        g.add_edge("A", "C").unwrap();
        g.add_edge("B", "A").unwrap();
        assert!(matches!(g.add_edge("C", "B"), Err(GraphError::CycleDetected { .. })));
        assert!(!g.has_edge(&node("C"), &node("B")));
    }

    #[test]
    fn add_edge_rejects_self_loop() {
        let mut g = Graph::new();
        assert!(matches!(g.add_edge("A", "A"), Err(GraphError::CycleDetected { .. })));
        assert_eq!(g.node_count(), 0);
        g.add_node("B").unwrap();
        assert!(matches!(g.add_edge("B", "B"), Err(GraphError::CycleDetected { .. })));
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn rejected_edges_leave_graph_unchanged() {
        let mut g = Graph::new();
        let before = g.clone();
        assert!(g.add_edge("A", "A").is_err());
        assert_eq!(g, before);

        g.add_edge("A", "B").unwrap();
        let before = g.clone();
        assert!(g.add_edge("A", "B").is_err());
        assert!(g.add_edge("B", "A").is_err());
        assert_eq!(g, before);
    }

    #[test]
    fn remove_node_cascades_edges() {
        let mut g = Graph::from_edges([("A", "B"), ("B", "C"), ("B", "D")]).unwrap();
        g.remove_node(&node("B")).unwrap();

        let mut want = AdjacencyList::new();
        want.insert(node("A"), vec![]);
        want.insert(node("C"), vec![]);
        want.insert(node("D"), vec![]);
        assert_eq!(g.adjacency_list(), want);
    }

    #[test]
    fn remove_node_missing_is_an_error() {
        let mut g = Graph::new();
        assert_eq!(g.remove_node(&node("Z")), Err(GraphError::NodeNotFound(node("Z"))));
        g.add_node("Z").unwrap();
        assert_eq!(g.remove_node(&node("Z")), Ok(()));
        assert!(g.is_empty());
    }

    #[test]
    fn adjacency_list_is_a_copy() {
        let g = Graph::from_edges([("A", "B"), ("A", "C"), ("B", "C")]).unwrap();
        let mut copy = g.adjacency_list();
        copy.entry(node("C")).or_default().push(node("D"));
        copy.remove(&node("A"));
        assert_eq!(g.successors(&node("C")), Some(&[][..]));
        assert_eq!(g.children(&node("A")).len(), 2);
    }

    #[test]
    fn children_are_transitive() {
        let g = Graph::from_edges([("A", "B"), ("B", "C"), ("B", "D")]).unwrap();
        assert_eq!(labels(&g.children(&node("A"))), ["B", "C", "D"]);
        assert_eq!(labels(&g.children(&node("B"))), ["C", "D"]);
        assert!(g.children(&node("C")).is_empty());
        assert!(g.children(&node("missing")).is_empty());
    }

    #[test]
    fn parents_are_transitive() {
        let g = Graph::from_edges([("A", "B"), ("B", "C"), ("B", "D"), ("D", "F")]).unwrap();
        assert_eq!(labels(&g.parents(&node("F"))), ["A", "B", "D"]);
        assert_eq!(labels(&g.parents(&node("B"))), ["A"]);
        assert!(g.parents(&node("A")).is_empty());
        assert!(g.parents(&node("missing")).is_empty());
    }

    #[test]
    fn parents_through_diamond_are_reported_once() {
        let g = Graph::from_edges([("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]).unwrap();
        assert_eq!(labels(&g.parents(&node("D"))), ["A", "B", "C"]);
    }

    #[test]
    fn breadth_first_search_stops_on_break() {
        let g = Graph::from_edges([("A", "B"), ("A", "C"), ("C", "D")]).unwrap();
        let mut seen = Vec::new();
        let flow = g.breadth_first_search(&node("A"), |n| {
            seen.push(n.clone());
            if n.as_str() == "C" {
                ControlFlow::Break(n.clone())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(flow, ControlFlow::Break(node("C")));
        assert_eq!(seen, [node("A"), node("B"), node("C")]);
    }

    #[test]
    fn breadth_first_search_from_absent_start_is_a_no_op() {
        let g = Graph::from_edges([("A", "B")]).unwrap();
        let mut calls = 0;
        let flow: ControlFlow<()> = g.breadth_first_search(&node("Q"), |_| {
            calls += 1;
            ControlFlow::Continue(())
        });
        assert!(flow.is_continue());
        assert_eq!(calls, 0);
    }

    #[test]
    fn topological_sort_respects_edges() {
        let g = Graph::from_edges([("E", "B"), ("B", "A"), ("C", "A"), ("D", "C")]).unwrap();
        let order = g.topological_sort();
        assert_eq!(order.len(), g.node_count());
        let pos = |n: &str| order.iter().position(|x| x.as_str() == n).unwrap();
        for (u, succ) in g.adjacency_list() {
            for v in succ {
                assert!(pos(u.as_str()) < pos(v.as_str()));
            }
        }
    }

    #[test]
    fn topological_sort_of_empty_graph_is_empty() {
        assert!(Graph::new().topological_sort().is_empty());
    }
}
