//! Iterator-based traversals over [`Graph`].

use std::collections::{HashSet, VecDeque};

use crate::graph::{Graph, Node};

/// An iterator for Breadth-First Search (BFS).
///
/// Yields borrowed labels in BFS order along successor edges, starting with
/// the start node itself. Each node is yielded at most once. Within a layer,
/// nodes come out in successor insertion order.
pub struct Bfs<'a> {
    graph: &'a Graph,
    visited: HashSet<&'a Node>,
    queue: VecDeque<&'a Node>,
}

impl<'a> Bfs<'a> {
    /// Creates a new BFS iterator starting from `start`.
    ///
    /// If `start` is not in the graph the iterator is empty.
    pub fn new(graph: &'a Graph, start: &Node) -> Self {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        if let Some(start) = graph.resolve(start) {
            visited.insert(start);
            queue.push_back(start);
        }

        Self {
            graph,
            visited,
            queue,
        }
    }
}

impl<'a> Iterator for Bfs<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.queue.pop_front()?;

        for v in self.graph.successors(u).into_iter().flatten() {
            if self.visited.insert(v) {
                self.queue.push_back(v);
            }
        }

        Some(u)
    }
}
