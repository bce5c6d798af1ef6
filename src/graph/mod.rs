//! Graph representation and algorithms module

pub mod builder;
pub mod generators;
pub mod merge;
pub mod topology;

pub use builder::NetworkBuilder;
pub use merge::merge;
pub use topology::Topology;

use crate::cluster::{ClusterArena, ClusterId, ClusterTree};

/// A live network under reduction: the graph plus the arena that explains
/// what every node stands for.
#[derive(Debug, Clone, Default)]
pub struct Network {
    /// Current (possibly reduced) graph
    pub topology: Topology,

    /// Every cluster ever created for this network
    pub clusters: ClusterArena,
}

impl Network {
    pub fn new(topology: Topology, clusters: ClusterArena) -> Self {
        Self { topology, clusters }
    }

    /// Build a network from labelled edges
    pub fn from_edges<'a, I>(edges: I) -> Result<Self, crate::ReduceError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut builder = NetworkBuilder::new();
        for (from, to) in edges {
            builder.add_edge(from, to)?;
        }
        Ok(builder.build())
    }

    pub fn node_count(&self) -> usize {
        self.topology.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.topology.edge_count()
    }

    /// Label of a node, see [`ClusterArena::label`]
    pub fn label(&self, node: ClusterId) -> String {
        self.clusters.label(node)
    }

    /// Look up a current node by its label
    pub fn find(&self, label: &str) -> Option<ClusterId> {
        self.topology
            .nodes()
            .into_iter()
            .find(|&node| self.clusters.label(node) == label)
    }

    /// Edge list of the current graph, as labels
    pub fn labelled_edges(&self) -> Vec<(String, String)> {
        self.topology
            .edges()
            .into_iter()
            .map(|(a, b)| (self.clusters.label(a), self.clusters.label(b)))
            .collect()
    }

    /// One cluster tree per current node, in node order
    pub fn cluster_trees(&self) -> Vec<ClusterTree> {
        self.topology
            .nodes()
            .into_iter()
            .filter_map(|node| self.clusters.tree(node))
            .collect()
    }

    /// Total number of primitive locations represented by the current graph
    pub fn represented_locations(&self) -> usize {
        self.clusters.total_size(&self.topology.nodes())
    }
}
