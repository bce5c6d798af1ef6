//! Topology reduction engine
//!
//! A [`Reducer`] runs passes over a [`Network`]. Each pass takes a working
//! copy of the graph and lets every [`Stage`] propose disjoint motifs from
//! it; accepted motifs are merged into the live graph and dropped from the
//! working copy, so later stages in the same pass never see partially
//! merged state or re-offer claimed nodes.

pub mod chain;
pub mod clique;
pub mod cycle;

use crate::cluster::{ClusterArena, ClusterId};
use crate::config::ReductionConfig;
use crate::error::ReduceError;
use crate::graph::{merge, Network, Topology};
use serde::Serialize;
use std::fmt;

/// Nodes selected together for one merge
pub type Motif = Vec<ClusterId>;

/// One reduction rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Pairwise merging along leaf-anchored paths
    Chain,

    /// Cycles of the configured length
    Grid,

    /// Maximal cliques up to the configured size
    Clique,
}

impl Stage {
    /// Propose motifs from `snapshot` without modifying it
    pub fn find_motifs(
        self,
        snapshot: &Topology,
        clusters: &ClusterArena,
        config: &ReductionConfig,
    ) -> Result<Vec<Motif>, ReduceError> {
        match self {
            Stage::Chain => Ok(chain::find_chain_motifs(snapshot, clusters)),
            Stage::Grid => cycle::find_cycle_motifs(snapshot, clusters, config.cycle_length),
            Stage::Clique => Ok(clique::find_clique_motifs(snapshot, clusters, config.max_clique_size)),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Chain => "chain",
            Stage::Grid => "grid",
            Stage::Clique => "clique",
        };
        f.write_str(name)
    }
}

/// What one stage did during a pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: Stage,

    /// Number of motifs merged
    pub motifs: usize,

    /// Number of nodes absorbed into composites
    pub nodes_merged: usize,
}

/// What one pass did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassReport {
    /// 1-based pass number
    pub pass: usize,
    pub nodes_before: usize,
    pub nodes_after: usize,
    pub edges_after: usize,
    pub stages: Vec<StageReport>,
}

impl PassReport {
    /// Total motifs merged in this pass
    pub fn merges(&self) -> usize {
        self.stages.iter().map(|s| s.motifs).sum()
    }
}

/// Summary of a complete run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReductionReport {
    pub initial_nodes: usize,
    pub initial_edges: usize,
    pub final_nodes: usize,
    pub final_edges: usize,
    pub passes: Vec<PassReport>,
}

/// Multi-pass orchestrator over the chain, grid and clique reducers
#[derive(Debug, Clone)]
pub struct Reducer {
    config: ReductionConfig,
}

impl Reducer {
    /// Create a reducer; the configuration is validated here
    pub fn new(config: ReductionConfig) -> Result<Self, ReduceError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ReductionConfig {
        &self.config
    }

    /// Run up to the configured number of passes.
    ///
    /// Stops early once the graph has at most one node, or after a pass
    /// that merged nothing.
    pub fn run(&self, network: &mut Network) -> Result<ReductionReport, ReduceError> {
        let initial_nodes = network.node_count();
        let initial_edges = network.edge_count();
        log::info!(
            "Reducing graph with {} nodes and {} edges ({} passes, order {:?})",
            initial_nodes,
            initial_edges,
            self.config.passes,
            self.config.order
        );

        let mut passes = Vec::with_capacity(self.config.passes);
        for pass in 1..=self.config.passes {
            if network.node_count() <= 1 {
                log::info!("Graph fully reduced after {} passes", pass - 1);
                break;
            }

            let report = self.run_pass(network, pass)?;
            let merges = report.merges();
            log::info!(
                "Pass {}: {} merges, {} -> {} nodes",
                pass,
                merges,
                report.nodes_before,
                report.nodes_after
            );
            passes.push(report);

            if merges == 0 {
                log::info!("No motifs left after pass {}", pass);
                break;
            }
        }

        Ok(ReductionReport {
            initial_nodes,
            initial_edges,
            final_nodes: network.node_count(),
            final_edges: network.edge_count(),
            passes,
        })
    }

    /// Run a single pass with the configured stage order
    pub fn run_pass(&self, network: &mut Network, pass: usize) -> Result<PassReport, ReduceError> {
        let nodes_before = network.node_count();
        let mut working = network.topology.clone();
        let mut stages = Vec::with_capacity(self.config.order.stages().len());

        for &stage in self.config.order.stages() {
            let motifs = stage.find_motifs(&working, &network.clusters, &self.config)?;

            let mut nodes_merged = 0;
            for motif in &motifs {
                merge(network, motif)?;
                working.remove_nodes(motif)?;
                nodes_merged += motif.len();
            }

            log::debug!("Pass {} {} stage merged {} motifs", pass, stage, motifs.len());
            stages.push(StageReport {
                stage,
                motifs: motifs.len(),
                nodes_merged,
            });
        }

        Ok(PassReport {
            pass,
            nodes_before,
            nodes_after: network.node_count(),
            edges_after: network.edge_count(),
            stages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PassOrder;
    use crate::graph::generators::SyntheticTopology;

    fn reducer(passes: usize, order: PassOrder) -> Reducer {
        Reducer::new(ReductionConfig::new(4, 4, passes, order)).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ReductionConfig::new(2, 4, 1, PassOrder::default());
        assert!(matches!(Reducer::new(config), Err(ReduceError::InvalidConfig(_))));
    }

    #[test]
    fn single_pass_on_a_line() {
        let mut network = SyntheticTopology::Chain { length: 5 }.build().unwrap();
        let report = reducer(1, PassOrder::ChainGridClique).run(&mut network).unwrap();

        assert_eq!(report.final_nodes, 3);
        assert_eq!(report.passes.len(), 1);
        assert_eq!(report.passes[0].stages[0].stage, Stage::Chain);
        assert_eq!(report.passes[0].stages[0].motifs, 2);
    }

    #[test]
    fn odd_leftover_joins_its_neighbor_in_later_passes() {
        let mut network = SyntheticTopology::Chain { length: 5 }.build().unwrap();
        let report = reducer(4, PassOrder::ChainGridClique).run(&mut network).unwrap();

        assert_eq!(network.node_count(), 1);
        assert_eq!(report.passes.len(), 3);
        let only = network.topology.nodes()[0];
        assert_eq!(network.label(only), "[[l0,l1],[l4,[l2,l3]]]");
    }

    #[test]
    fn stages_in_one_pass_never_share_nodes() {
        let mut network = SyntheticTopology::Grid { rows: 4, cols: 5 }.build().unwrap();
        let before = network.represented_locations();
        reducer(1, PassOrder::ChainGridClique).run(&mut network).unwrap();

        // Every location still belongs to exactly one current node
        let mut leaves: Vec<String> = network
            .cluster_trees()
            .iter()
            .flat_map(|t| t.leaves().into_iter().map(str::to_string).collect::<Vec<_>>())
            .collect();
        leaves.sort();
        leaves.dedup();
        assert_eq!(leaves.len(), before);
        assert_eq!(network.represented_locations(), before);
    }

    #[test]
    fn passes_stop_once_nothing_merges() {
        // No leaves, no 4-cycles, no triangles
        let mut network = SyntheticTopology::Ring { length: 5 }.build().unwrap();
        let report = reducer(5, PassOrder::ChainGridClique).run(&mut network).unwrap();

        assert_eq!(report.passes.len(), 1);
        assert_eq!(report.passes[0].merges(), 0);
        assert_eq!(network.node_count(), 5);
    }

    #[test]
    fn bowtie_collapses_over_two_passes() {
        let mut network =
            Network::from_edges([("a", "b"), ("b", "c"), ("c", "a"), ("c", "d"), ("d", "e"), ("e", "c")])
                .unwrap();
        let report = reducer(5, PassOrder::ChainGridClique).run(&mut network).unwrap();

        // One triangle per pass; the merged triangle forms a new one with d and e
        assert_eq!(report.passes.len(), 2);
        assert_eq!(network.node_count(), 1);
        let only = network.topology.nodes()[0];
        // Clique members are kept in id order, and the composite is newest
        assert_eq!(network.label(only), "[d,e,[a,b,c]]");
    }

    #[test]
    fn empty_and_single_node_graphs_are_no_ops() {
        let mut empty = Network::default();
        let report = reducer(3, PassOrder::ChainGridClique).run(&mut empty).unwrap();
        assert!(report.passes.is_empty());

        let mut single = SyntheticTopology::Chain { length: 1 }.build().unwrap();
        let report = reducer(3, PassOrder::ChainGridClique).run(&mut single).unwrap();
        assert!(report.passes.is_empty());
        assert_eq!(single.node_count(), 1);
    }
}
