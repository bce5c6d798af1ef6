//! Merge operator: collapse a motif into one composite node

use crate::cluster::ClusterId;
use crate::error::ReduceError;
use crate::graph::Network;
use std::collections::{BTreeSet, HashSet};

/// Replace `members` with a single composite node.
///
/// The composite is connected exactly once to every node that neighbored
/// any member, excluding the members themselves; edges inside the motif are
/// discarded. Member order is kept in the composite's cluster entry.
///
/// All preconditions are checked before the graph is touched, so a failed
/// merge leaves `network` unchanged.
pub fn merge(network: &mut Network, members: &[ClusterId]) -> Result<ClusterId, ReduceError> {
    if members.is_empty() {
        return Err(ReduceError::EmptyMotif);
    }

    let mut seen = HashSet::with_capacity(members.len());
    for &member in members {
        if !network.topology.contains_node(member) {
            return Err(ReduceError::UnknownNode(member));
        }
        if !seen.insert(member) {
            return Err(ReduceError::DuplicateMember(member));
        }
    }

    // External connectivity of the whole motif
    let external: BTreeSet<ClusterId> = members
        .iter()
        .flat_map(|&member| network.topology.neighbors(member))
        .filter(|neighbor| !seen.contains(neighbor))
        .collect();

    let composite = network.clusters.push_group(members)?;
    network.topology.remove_nodes(members)?;
    network.topology.add_node(composite);
    for neighbor in external {
        network.topology.add_edge(composite, neighbor);
    }

    log::debug!(
        "Merged {} nodes into {} (size {})",
        members.len(),
        composite,
        network.clusters.size(composite)
    );

    Ok(composite)
}
