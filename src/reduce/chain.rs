//! Chain reduction: pairwise merging along degree-bounded paths

use crate::cluster::{ClusterArena, ClusterId};
use crate::graph::Topology;
use crate::reduce::Motif;
use itertools::Itertools;
use std::collections::HashSet;

/// Propose pairwise merges along every chain that starts at a leaf.
///
/// Leaves (degree 1) are visited smallest first, so primitive chains are
/// consumed before chains that end in composites. Each chain is split into
/// consecutive pairs; an odd last node stays as it is for this pass. No node
/// appears in two motifs.
pub fn find_chain_motifs(snapshot: &Topology, clusters: &ClusterArena) -> Vec<Motif> {
    let ends: Vec<ClusterId> = snapshot
        .nodes()
        .into_iter()
        .filter(|&node| snapshot.degree(node) == 1)
        .sorted_by_key(|&node| (clusters.size(node), node))
        .collect();

    let mut claimed: HashSet<ClusterId> = HashSet::new();
    let mut motifs = Vec::new();

    for end in ends {
        if claimed.contains(&end) {
            continue;
        }

        let chain = walk_chain(snapshot, end, &claimed);
        log::trace!("Chain from {} has {} nodes", end, chain.len());

        motifs.extend(chain.chunks_exact(2).map(|pair| pair.to_vec()));
        claimed.extend(chain);
    }

    motifs
}

/// Walk from `start` while exactly one unvisited, unclaimed neighbor of
/// degree at most 2 is available.
pub fn walk_chain(snapshot: &Topology, start: ClusterId, claimed: &HashSet<ClusterId>) -> Vec<ClusterId> {
    let mut chain = vec![start];
    let mut visited: HashSet<ClusterId> = HashSet::from([start]);
    let mut current = start;

    loop {
        let next: Vec<ClusterId> = snapshot
            .neighbors(current)
            .into_iter()
            .filter(|n| snapshot.degree(*n) <= 2 && !visited.contains(n) && !claimed.contains(n))
            .collect();

        match next.as_slice() {
            [only] => {
                chain.push(*only);
                visited.insert(*only);
                current = *only;
            }
            _ => break,
        }
    }

    chain
}
