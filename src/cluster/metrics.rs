//! Cluster statistics and metrics

use crate::cluster::ClusterTree;
use crate::graph::Network;
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;

/// Trees above this count are measured in parallel
const PARALLEL_THRESHOLD: usize = 1000;

/// Aggregate statistics over the clusters of a reduced network
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    /// Nodes produced by a merge
    pub composite_count: usize,

    /// Nodes that were never merged
    pub primitive_count: usize,

    /// Primitive locations represented in total
    pub location_count: usize,

    /// Size of the largest cluster
    pub largest_size: usize,

    /// Mean cluster size
    pub mean_size: f64,

    /// Standard deviation of cluster sizes (0 for fewer than two clusters)
    pub size_std_dev: f64,

    /// Deepest nesting of merges
    pub max_depth: usize,

    /// Current node count divided by represented locations
    pub reduction_ratio: f64,
}

/// Calculate summary metrics for every current node of `network`
pub fn summarize(network: &Network) -> ClusterSummary {
    summarize_trees(&network.cluster_trees())
}

/// Calculate summary metrics for a set of cluster trees
pub fn summarize_trees(trees: &[ClusterTree]) -> ClusterSummary {
    // (size, depth) per tree
    let measures: Vec<(usize, usize)> = if trees.len() < PARALLEL_THRESHOLD {
        trees.iter().map(|t| (t.size(), t.depth())).collect()
    } else {
        trees.par_iter().map(|t| (t.size(), t.depth())).collect()
    };

    let sizes: Vec<f64> = measures.iter().map(|&(size, _)| size as f64).collect();
    let location_count: usize = measures.iter().map(|&(size, _)| size).sum();
    let composite_count = trees
        .iter()
        .filter(|t| matches!(t, ClusterTree::Group(_)))
        .count();

    let mean_size = if sizes.is_empty() { 0.0 } else { sizes.iter().mean() };
    let size_std_dev = if sizes.len() < 2 { 0.0 } else { sizes.iter().std_dev() };

    ClusterSummary {
        composite_count,
        primitive_count: trees.len() - composite_count,
        location_count,
        largest_size: measures.iter().map(|&(size, _)| size).max().unwrap_or(0),
        mean_size,
        size_std_dev,
        max_depth: measures.iter().map(|&(_, depth)| depth).max().unwrap_or(0),
        reduction_ratio: if location_count == 0 {
            1.0
        } else {
            trees.len() as f64 / location_count as f64
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(label: &str) -> ClusterTree {
        ClusterTree::Leaf(label.to_string())
    }

    #[test]
    fn summary_of_mixed_clusters() {
        let trees = vec![
            ClusterTree::Group(vec![ClusterTree::Group(vec![leaf("a"), leaf("b")]), leaf("c")]),
            leaf("d"),
        ];
        let summary = summarize_trees(&trees);

        assert_eq!(summary.composite_count, 1);
        assert_eq!(summary.primitive_count, 1);
        assert_eq!(summary.location_count, 4);
        assert_eq!(summary.largest_size, 3);
        assert_eq!(summary.max_depth, 2);
        assert!((summary.mean_size - 2.0).abs() < 1e-9);
        assert!((summary.reduction_ratio - 0.5).abs() < 1e-9);
        assert!(summary.size_std_dev > 0.0);
    }

    #[test]
    fn empty_summary_is_neutral() {
        let summary = summarize_trees(&[]);
        assert_eq!(summary.location_count, 0);
        assert_eq!(summary.mean_size, 0.0);
        assert_eq!(summary.reduction_ratio, 1.0);
    }
}
