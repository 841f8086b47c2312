//! Neighbour sets of terms whose pairwise score cleared the cutoff

use crate::core::TermIndex;
use std::collections::{BTreeMap, BTreeSet};

/// Symmetric adjacency keyed by term index.
///
/// Neighbour sets are ordered so that every walk over them is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyList {
    edges: BTreeMap<TermIndex, BTreeSet<TermIndex>>,
}

impl AdjacencyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the undirected edge `a — b`. Re-adding an edge is a no-op.
    pub fn add_edge(&mut self, a: TermIndex, b: TermIndex) {
        if a == b {
            return;
        }
        self.edges.entry(a).or_default().insert(b);
        self.edges.entry(b).or_default().insert(a);
    }

    /// Neighbours of `node`; empty when it has none.
    pub fn neighbors(&self, node: TermIndex) -> BTreeSet<TermIndex> {
        self.edges.get(&node).cloned().unwrap_or_default()
    }

    pub fn has_neighbor(&self, node: TermIndex, neighbor: TermIndex) -> bool {
        self.edges
            .get(&node)
            .is_some_and(|set| set.contains(&neighbor))
    }

    /// Terms with at least one neighbour, ascending, with their neighbour sets.
    pub fn iter(&self) -> impl Iterator<Item = (TermIndex, &BTreeSet<TermIndex>)> {
        self.edges.iter().map(|(node, set)| (*node, set))
    }

    /// Number of terms with at least one neighbour.
    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_is_symmetric_and_idempotent() {
        let mut adjacency = AdjacencyList::new();
        adjacency.add_edge(0, 3);
        adjacency.add_edge(3, 0);
        adjacency.add_edge(0, 3);

        assert!(adjacency.has_neighbor(0, 3));
        assert!(adjacency.has_neighbor(3, 0));
        assert_eq!(adjacency.edge_count(), 1);
        assert_eq!(adjacency.node_count(), 2);
    }

    #[test]
    fn test_missing_node_has_no_neighbors() {
        let adjacency = AdjacencyList::new();
        assert!(adjacency.neighbors(7).is_empty());
        assert!(!adjacency.has_neighbor(7, 1));
    }

    #[test]
    fn test_self_edges_ignored() {
        let mut adjacency = AdjacencyList::new();
        adjacency.add_edge(2, 2);
        assert!(adjacency.is_empty());
    }

    #[test]
    fn test_iter_is_ordered() {
        let mut adjacency = AdjacencyList::new();
        adjacency.add_edge(4, 1);
        adjacency.add_edge(2, 1);
        let nodes: Vec<_> = adjacency.iter().map(|(node, _)| node).collect();
        assert_eq!(nodes, vec![1, 2, 4]);
        assert_eq!(
            adjacency.neighbors(1).into_iter().collect::<Vec<_>>(),
            vec![2, 4]
        );
    }
}
