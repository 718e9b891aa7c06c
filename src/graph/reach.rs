//! A one-shot reachability index for a graph snapshot.
//!
//! Nodes are numbered in topological order, so every edge points from a
//! smaller index to a larger one. Descendant sets are word-packed bitsets
//! filled by dynamic programming in reverse topological order; ancestor counts
//! fall out of the descendant sets. Building the index costs
//! \(O(n \cdot m / 64)\) word operations and lets strategies score every node
//! without a BFS per candidate.

use std::collections::HashMap;

use crate::graph::{Graph, Node};

/// A dense, word-packed bitset over node indices.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Bitset {
    words: Vec<u64>,
}

impl Bitset {
    fn new(bits: usize) -> Self {
        Self {
            words: vec![0; bits.div_ceil(64)],
        }
    }

    #[inline]
    fn insert(&mut self, bit: usize) {
        self.words[bit / 64] |= 1u64 << (bit % 64);
    }

    #[inline]
    fn contains(&self, bit: usize) -> bool {
        self.words
            .get(bit / 64)
            .is_some_and(|&w| w & (1u64 << (bit % 64)) != 0)
    }

    fn union_with(&mut self, other: &Self) {
        for (dst, src) in self.words.iter_mut().zip(&other.words) {
            *dst |= *src;
        }
    }

    fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            let mut rest = word;
            core::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let bit = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some(i * 64 + bit)
            })
        })
    }
}

/// How one node splits the rest of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    /// Nodes that can reach the node.
    pub ancestors: usize,
    /// Nodes the node can reach.
    pub descendants: usize,
    /// Nodes related in neither direction.
    pub unrelated: usize,
}

impl Partition {
    /// The size of the largest of the three parts.
    pub fn largest(&self) -> usize {
        self.ancestors.max(self.descendants).max(self.unrelated)
    }
}

/// Transitive closure of a [`Graph`] borrowed at one point in time.
pub struct Reachability<'g> {
    order: Vec<&'g Node>,
    index: HashMap<&'g Node, usize>,
    descendants: Vec<Bitset>,
    ancestor_counts: Vec<usize>,
}

impl<'g> Reachability<'g> {
    /// Builds the index for `graph`.
    pub fn new(graph: &'g Graph) -> Self {
        let order = graph.topological_order();
        let n = order.len();
        let index: HashMap<&Node, usize> = order.iter().enumerate().map(|(i, &node)| (node, i)).collect();

        let mut descendants: Vec<Bitset> = (0..n).map(|_| Bitset::new(n)).collect();
        for u in (0..n).rev() {
            for v in graph.successors(order[u]).into_iter().flatten() {
                let Some(&v) = index.get(v) else { continue };
                // Topological numbering puts every successor after `u`.
                let (head, tail) = descendants.split_at_mut(v);
                head[u].union_with(&tail[0]);
                head[u].insert(v);
            }
        }

        let mut ancestor_counts = vec![0usize; n];
        for set in &descendants {
            for v in set.ones() {
                ancestor_counts[v] += 1;
            }
        }

        Self {
            order,
            index,
            descendants,
            ancestor_counts,
        }
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the indexed graph had no nodes.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` if `descendant` is strictly reachable from `ancestor`.
    pub fn reaches(&self, ancestor: &Node, descendant: &Node) -> bool {
        match (self.index.get(ancestor), self.index.get(descendant)) {
            (Some(&a), Some(&d)) => self.descendants[a].contains(d),
            _ => false,
        }
    }

    /// How the node at topological position `i` splits the remaining nodes.
    ///
    /// # Panics
    /// Panics if `i >= len()`.
    pub fn partition_at(&self, i: usize) -> Partition {
        let descendants = self.descendants[i].count();
        let ancestors = self.ancestor_counts[i];
        Partition {
            ancestors,
            descendants,
            unrelated: self.len() - 1 - ancestors - descendants,
        }
    }

    /// How `node` splits the remaining nodes, or `None` if it is not indexed.
    pub fn partition(&self, node: &Node) -> Option<Partition> {
        self.index.get(node).map(|&i| self.partition_at(i))
    }

    /// Every node paired with its partition, in topological order.
    pub fn partitions(&self) -> impl Iterator<Item = (&'g Node, Partition)> + '_ {
        self.order
            .iter()
            .enumerate()
            .map(|(i, &node)| (node, self.partition_at(i)))
    }
}
