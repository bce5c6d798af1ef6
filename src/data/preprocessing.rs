//! Input diagnostics computed before reduction

use crate::graph::Network;
use serde::Serialize;

/// Shape of an input graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputProfile {
    pub node_count: usize,
    pub edge_count: usize,

    /// Connected components, isolated nodes included
    pub components: usize,

    /// Nodes without any edge; no reducer will touch them
    pub isolated_nodes: usize,

    /// Degree-1 nodes, i.e. candidate chain ends
    pub leaves: usize,

    pub max_degree: usize,
}

/// Describe `network` before it is reduced
pub fn profile(network: &Network) -> InputProfile {
    let nodes = network.topology.nodes();
    let degrees: Vec<usize> = nodes.iter().map(|&n| network.topology.degree(n)).collect();

    let profile = InputProfile {
        node_count: nodes.len(),
        edge_count: network.edge_count(),
        components: network.topology.component_count(),
        isolated_nodes: degrees.iter().filter(|&&d| d == 0).count(),
        leaves: degrees.iter().filter(|&&d| d == 1).count(),
        max_degree: degrees.iter().copied().max().unwrap_or(0),
    };

    if profile.components > 1 {
        log::warn!(
            "Input graph has {} connected components ({} isolated nodes)",
            profile.components,
            profile.isolated_nodes
        );
    }

    profile
}
