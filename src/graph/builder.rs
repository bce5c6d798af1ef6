//! Graph construction module

use crate::cluster::label::parse_label;
use crate::cluster::{ClusterArena, ClusterId};
use crate::error::ReduceError;
use crate::graph::{Network, Topology};
use std::collections::HashMap;

/// Builder for incrementally constructing a [`Network`] from labelled edges
pub struct NetworkBuilder {
    /// Mapping from canonical labels to node ids
    id_to_index: HashMap<String, ClusterId>,

    topology: Topology,

    clusters: ClusterArena,

    /// Input self-loops that were dropped
    skipped_self_loops: usize,
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new builder with the given node capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            topology: Topology::with_capacity(capacity, capacity),
            clusters: ClusterArena::new(),
            skipped_self_loops: 0,
        }
    }

    /// Get or create the node for the given label.
    ///
    /// Labels are compared in their canonical form, so ` a` and `a`, or
    /// `[a, b]` and `[a,b]`, name the same node.
    pub fn get_or_create_node(&mut self, label: &str) -> Result<ClusterId, ReduceError> {
        let tree = parse_label(label)?;
        let canonical = tree.to_string();
        if let Some(&id) = self.id_to_index.get(&canonical) {
            return Ok(id);
        }

        let id = self.clusters.insert_tree(&tree);
        self.id_to_index.insert(canonical, id);
        self.topology.add_node(id);

        Ok(id)
    }

    /// Add an undirected edge between two labels.
    ///
    /// Self-loops keep their node but lose the edge; repeated edges collapse.
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<(), ReduceError> {
        let a = self.get_or_create_node(from)?;
        let b = self.get_or_create_node(to)?;

        if a == b {
            self.skipped_self_loops += 1;
            return Ok(());
        }

        self.topology.add_edge(a, b);
        Ok(())
    }

    /// Build the network
    pub fn build(self) -> Network {
        if self.skipped_self_loops > 0 {
            log::warn!("Dropped {} self-loop edges from the input", self.skipped_self_loops);
        }

        Network::new(self.topology, self.clusters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_interned_once() {
        let mut builder = NetworkBuilder::new();
        builder.add_edge("a", "b").unwrap();
        builder.add_edge("b", "a").unwrap();
        builder.add_edge("b", "c").unwrap();
        let network = builder.build();

        assert_eq!(network.node_count(), 3);
        assert_eq!(network.edge_count(), 2);
        assert_eq!(network.clusters.len(), 3);
    }

    #[test]
    fn equivalent_spellings_share_a_node() {
        let network = Network::from_edges([(" a", "b"), ("a", "c")]).unwrap();
        assert_eq!(network.node_count(), 3);
        let labels: Vec<String> =
            network.topology.nodes().into_iter().map(|n| network.label(n)).collect();
        assert_eq!(labels.iter().filter(|l| l.as_str() == "a").count(), 1);

        let network = Network::from_edges([("[a, b]", "c"), ("[a,b]", "d")]).unwrap();
        assert_eq!(network.node_count(), 3);
        let pair = network.find("[a,b]").unwrap();
        assert_eq!(network.topology.degree(pair), 2);
    }

    #[test]
    fn plain_labels_with_commas_are_kept() {
        let network = Network::from_edges([("Bus 1, North", "Bus 2")]).unwrap();
        let bus = network.find("Bus 1, North").unwrap();
        assert_eq!(network.clusters.size(bus), 1);
    }

    #[test]
    fn self_loops_keep_the_node() {
        let mut builder = NetworkBuilder::new();
        builder.add_edge("a", "a").unwrap();
        let network = builder.build();

        assert_eq!(network.node_count(), 1);
        assert_eq!(network.edge_count(), 0);
    }

    #[test]
    fn composite_input_labels_keep_their_size() {
        let network = Network::from_edges([("[l1,l2]", "l3")]).unwrap();
        let composite = network.find("[l1,l2]").unwrap();

        assert_eq!(network.clusters.size(composite), 2);
        assert_eq!(network.represented_locations(), 3);
    }

    #[test]
    fn malformed_label_is_an_error() {
        let mut builder = NetworkBuilder::new();
        assert!(matches!(
            builder.add_edge("[l1,l2", "l3"),
            Err(ReduceError::MalformedLabel { .. })
        ));
    }
}
