//! Undirected simple graph over cluster ids

use crate::cluster::ClusterId;
use crate::error::ReduceError;
use petgraph::graphmap::UnGraphMap;

/// Undirected graph whose nodes are [`ClusterId`]s.
///
/// At most one edge joins any pair of nodes and self-loops are never
/// stored. `nodes()` and `neighbors()` iterate in ascending id order, which
/// is creation order, so every reducer built on top of this type is
/// deterministic.
///
/// Cloning yields a fully independent snapshot.
#[derive(Debug, Clone)]
pub struct Topology {
    graph: UnGraphMap<ClusterId, ()>,
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}

impl Topology {
    pub fn new() -> Self {
        Self {
            graph: UnGraphMap::new(),
        }
    }

    /// Create an empty graph with pre-allocated capacity
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: UnGraphMap::with_capacity(nodes, edges),
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains_node(&self, node: ClusterId) -> bool {
        self.graph.contains_node(node)
    }

    pub fn contains_edge(&self, a: ClusterId, b: ClusterId) -> bool {
        self.graph.contains_edge(a, b)
    }

    /// All nodes, ascending
    pub fn nodes(&self) -> Vec<ClusterId> {
        let mut nodes: Vec<ClusterId> = self.graph.nodes().collect();
        nodes.sort_unstable();
        nodes
    }

    /// Neighbors of `node`, ascending. Empty for unknown nodes.
    pub fn neighbors(&self, node: ClusterId) -> Vec<ClusterId> {
        let mut neighbors: Vec<ClusterId> = self.graph.neighbors(node).collect();
        neighbors.sort_unstable();
        neighbors
    }

    pub fn degree(&self, node: ClusterId) -> usize {
        self.graph.neighbors(node).count()
    }

    /// Number of connected components, isolated nodes included
    pub fn component_count(&self) -> usize {
        petgraph::algo::connected_components(&self.graph)
    }

    /// All edges as `(low, high)` pairs, sorted
    pub fn edges(&self) -> Vec<(ClusterId, ClusterId)> {
        let mut edges: Vec<(ClusterId, ClusterId)> = self
            .graph
            .all_edges()
            .map(|(a, b, _)| if a <= b { (a, b) } else { (b, a) })
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Insert `node` if it is not already present
    pub fn add_node(&mut self, node: ClusterId) {
        self.graph.add_node(node);
    }

    /// Connect `a` and `b`, inserting missing endpoints.
    ///
    /// Returns `false` when nothing was added: the edge already existed or
    /// it would be a self-loop.
    pub fn add_edge(&mut self, a: ClusterId, b: ClusterId) -> bool {
        if a == b || self.graph.contains_edge(a, b) {
            return false;
        }
        self.graph.add_edge(a, b, ());
        true
    }

    /// Remove `node` together with its incident edges
    pub fn remove_node(&mut self, node: ClusterId) -> Result<(), ReduceError> {
        if self.graph.remove_node(node) {
            Ok(())
        } else {
            Err(ReduceError::UnknownNode(node))
        }
    }

    /// Remove every node in `nodes`; fails on the first one that is missing
    pub fn remove_nodes(&mut self, nodes: &[ClusterId]) -> Result<(), ReduceError> {
        for &node in nodes {
            self.remove_node(node)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> ClusterId {
        ClusterId(n)
    }

    #[test]
    fn edges_are_undirected_and_deduplicated() {
        let mut graph = Topology::new();
        assert!(graph.add_edge(id(0), id(1)));
        assert!(!graph.add_edge(id(1), id(0)));
        assert!(!graph.add_edge(id(2), id(2)));

        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains_edge(id(1), id(0)));
        assert_eq!(graph.degree(id(0)), 1);
        assert!(!graph.contains_node(id(2)));
    }

    #[test]
    fn neighbors_iterate_in_ascending_order() {
        let mut graph = Topology::new();
        graph.add_edge(id(5), id(3));
        graph.add_edge(id(5), id(9));
        graph.add_edge(id(5), id(1));

        assert_eq!(graph.neighbors(id(5)), vec![id(1), id(3), id(9)]);
        assert_eq!(graph.nodes(), vec![id(1), id(3), id(5), id(9)]);
        assert!(graph.neighbors(id(42)).is_empty());
    }

    #[test]
    fn remove_node_drops_incident_edges() {
        let mut graph = Topology::new();
        graph.add_edge(id(0), id(1));
        graph.add_edge(id(1), id(2));
        graph.remove_node(id(1)).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.remove_node(id(1)), Err(ReduceError::UnknownNode(id(1))));
        // removing the middle of a path splits it
        assert_eq!(graph.component_count(), 2);
    }

    #[test]
    fn clone_is_independent() {
        let mut graph = Topology::new();
        graph.add_edge(id(0), id(1));
        let snapshot = graph.clone();
        graph.remove_node(id(0)).unwrap();

        assert!(snapshot.contains_edge(id(0), id(1)));
        assert!(!graph.contains_node(id(0)));
    }
}
