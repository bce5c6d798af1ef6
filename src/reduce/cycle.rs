//! Grid reduction: collapse simple cycles of a fixed length

use crate::cluster::{ClusterArena, ClusterId};
use crate::error::ReduceError;
use crate::graph::Topology;
use crate::reduce::Motif;
use itertools::Itertools;
use std::collections::HashSet;

/// Propose disjoint cycles of exactly `length` nodes.
///
/// Works on a private copy of `snapshot`. Start nodes are tried smallest
/// first; the first closing cycle found from a start node is accepted and
/// its nodes leave the copy. The start node leaves the copy either way.
pub fn find_cycle_motifs(
    snapshot: &Topology,
    clusters: &ClusterArena,
    length: usize,
) -> Result<Vec<Motif>, ReduceError> {
    let mut remaining = snapshot.clone();
    let starts: Vec<ClusterId> = remaining
        .nodes()
        .into_iter()
        .sorted_by_key(|&node| (clusters.size(node), node))
        .collect();

    let mut motifs = Vec::new();
    for start in starts {
        if !remaining.contains_node(start) {
            continue;
        }

        if let Some(cycle) = find_cycle(&remaining, start, length) {
            remaining.remove_nodes(&cycle[1..])?;
            motifs.push(cycle);
        }
        remaining.remove_node(start)?;
    }

    Ok(motifs)
}

/// Depth-first search for a simple cycle of exactly `length` nodes through
/// `start`.
///
/// The returned path begins at `start`, repeats no node, and its last node
/// is adjacent to `start`. Neighbors are explored in ascending id order.
pub fn find_cycle(graph: &Topology, start: ClusterId, length: usize) -> Option<Vec<ClusterId>> {
    if length < 3 || !graph.contains_node(start) {
        return None;
    }

    let mut path = Vec::with_capacity(length);
    path.push(start);
    let mut visited = HashSet::from([start]);

    if extend_path(graph, &mut path, &mut visited, length) {
        Some(path)
    } else {
        None
    }
}

fn extend_path(
    graph: &Topology,
    path: &mut Vec<ClusterId>,
    visited: &mut HashSet<ClusterId>,
    length: usize,
) -> bool {
    let last = path[path.len() - 1];
    if path.len() == length {
        return graph.contains_edge(last, path[0]);
    }

    for neighbor in graph.neighbors(last) {
        if !visited.insert(neighbor) {
            continue;
        }
        path.push(neighbor);
        if extend_path(graph, path, visited, length) {
            return true;
        }
        path.pop();
        visited.remove(&neighbor);
    }

    false
}
