//! Clique reduction: collapse fully meshed groups

use crate::cluster::{ClusterArena, ClusterId};
use crate::graph::Topology;
use crate::reduce::Motif;
use std::collections::{BTreeSet, HashSet};

/// Propose disjoint cliques, largest permitted size first.
///
/// Within one size tier cliques with the smallest total represented size
/// go first. A clique that touches an already accepted clique is dropped;
/// it is not retried at a smaller size.
pub fn find_clique_motifs(snapshot: &Topology, clusters: &ClusterArena, max_size: usize) -> Vec<Motif> {
    let cliques = maximal_cliques(snapshot);
    let mut claimed: HashSet<ClusterId> = HashSet::new();
    let mut motifs = Vec::new();

    for size in (3..=max_size).rev() {
        let mut tier: Vec<&Vec<ClusterId>> = cliques.iter().filter(|c| c.len() == size).collect();
        tier.sort_by(|a, b| {
            (clusters.total_size(a), *a).cmp(&(clusters.total_size(b), *b))
        });

        for clique in tier {
            if clique.iter().any(|node| claimed.contains(node)) {
                continue;
            }
            claimed.extend(clique.iter().copied());
            motifs.push(clique.clone());
        }
    }

    motifs
}

/// Every maximal clique of `graph`, each sorted ascending, in ascending
/// order.
///
/// Bron–Kerbosch with pivoting on the node covering the most candidates.
pub fn maximal_cliques(graph: &Topology) -> Vec<Vec<ClusterId>> {
    let mut cliques = Vec::new();
    let candidates: BTreeSet<ClusterId> = graph.nodes().into_iter().collect();

    bron_kerbosch(graph, Vec::new(), candidates, BTreeSet::new(), &mut cliques);

    cliques.sort();
    cliques
}

fn bron_kerbosch(
    graph: &Topology,
    clique: Vec<ClusterId>,
    mut candidates: BTreeSet<ClusterId>,
    mut excluded: BTreeSet<ClusterId>,
    cliques: &mut Vec<Vec<ClusterId>>,
) {
    if candidates.is_empty() {
        if excluded.is_empty() && !clique.is_empty() {
            let mut found = clique;
            found.sort_unstable();
            cliques.push(found);
        }
        return;
    }

    let pivot = candidates
        .iter()
        .chain(excluded.iter())
        .copied()
        .max_by_key(|&u| {
            graph
                .neighbors(u)
                .iter()
                .filter(|n| candidates.contains(*n))
                .count()
        });
    let pivot_neighbors: BTreeSet<ClusterId> = match pivot {
        Some(p) => graph.neighbors(p).into_iter().collect(),
        None => BTreeSet::new(),
    };

    let branches: Vec<ClusterId> = candidates.difference(&pivot_neighbors).copied().collect();
    for v in branches {
        let neighbors: BTreeSet<ClusterId> = graph.neighbors(v).into_iter().collect();
        let mut grown = clique.clone();
        grown.push(v);

        bron_kerbosch(
            graph,
            grown,
            candidates.intersection(&neighbors).copied().collect(),
            excluded.intersection(&neighbors).copied().collect(),
            cliques,
        );

        candidates.remove(&v);
        excluded.insert(v);
    }
}
