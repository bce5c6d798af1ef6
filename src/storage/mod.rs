//! Results persistence module

use crate::cluster::metrics::{self, ClusterSummary};
use crate::cluster::{ClusterArena, ClusterId};
use crate::config::ReductionConfig;
use crate::data::{InputProfile, DEFAULT_FROM_COLUMN, DEFAULT_TO_COLUMN};
use crate::graph::{Network, Topology};
use crate::reduce::ReductionReport;
use anyhow::{anyhow, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, to_string_pretty};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// File name of the resumable reduction state
pub const STATE_FILE: &str = "state.bin";

/// Save reduction results to the specified directory
pub fn save_results(
    network: &Network,
    config: &ReductionConfig,
    input: &InputProfile,
    report: &ReductionReport,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving reduced graph with {} nodes to {}", network.node_count(), output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_reduced_edges(network, output_dir)?;
    save_clusters(network, output_dir)?;
    save_summary(network, config, input, report, output_dir)?;
    save_state(network, &Path::new(output_dir).join(STATE_FILE))?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save the reduced edge list as `from,to` rows of labels.
///
/// The file loads back through [`crate::data::load_edge_list`] with the
/// default column names.
fn save_reduced_edges(network: &Network, output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("reduced_edges.csv");

    let (from, to): (Vec<String>, Vec<String>) = network.labelled_edges().into_iter().unzip();
    let mut df = df!(
        DEFAULT_FROM_COLUMN => from,
        DEFAULT_TO_COLUMN => to
    )?;

    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;

    Ok(())
}

/// Save the nested cluster trees, one per reduced node
fn save_clusters(network: &Network, output_dir: &str) -> Result<()> {
    log::info!("Saving cluster trees");

    let path = Path::new(output_dir).join("clusters.json");
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(&network.cluster_trees())?.as_bytes())?;

    Ok(())
}

/// Save summary information
fn save_summary(
    network: &Network,
    config: &ReductionConfig,
    input: &InputProfile,
    report: &ReductionReport,
    output_dir: &str,
) -> Result<()> {
    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let clusters: ClusterSummary = metrics::summarize(network);
    let summary = json!({
        "config": config,
        "input": input,
        "reduction": report,
        "clusters": clusters,
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Serialized form of a [`Network`]
#[derive(Debug, Serialize, Deserialize)]
struct NetworkState {
    clusters: ClusterArena,
    nodes: Vec<ClusterId>,
    edges: Vec<(ClusterId, ClusterId)>,
}

/// Write a resumable snapshot of `network`
pub fn save_state(network: &Network, path: &Path) -> Result<()> {
    let state = NetworkState {
        clusters: network.clusters.clone(),
        nodes: network.topology.nodes(),
        edges: network.topology.edges(),
    };

    let bytes = bincode::serialize(&state)?;
    fs::write(path, bytes)?;

    log::debug!("Saved reduction state to {}", path.display());
    Ok(())
}

/// Restore a network written by [`save_state`]
pub fn load_state(path: &Path) -> Result<Network> {
    log::info!("Resuming from {}", path.display());

    let bytes = fs::read(path)?;
    let state: NetworkState = bincode::deserialize(&bytes)?;
    state.clusters.validate()?;

    let mut topology = Topology::with_capacity(state.nodes.len(), state.edges.len());
    for node in state.nodes {
        if !state.clusters.contains(node) {
            return Err(anyhow!("state file references unknown node {}", node));
        }
        topology.add_node(node);
    }
    for (a, b) in state.edges {
        if !topology.contains_node(a) || !topology.contains_node(b) {
            return Err(anyhow!("state file has an edge {}-{} outside the graph", a, b));
        }
        topology.add_edge(a, b);
    }

    Ok(Network::new(topology, state.clusters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::generators::SyntheticTopology;
    use crate::reduce::Reducer;

    #[test]
    fn state_round_trip_keeps_labels_and_edges() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STATE_FILE);

        let mut network = SyntheticTopology::Chain { length: 5 }.build().unwrap();
        let config = ReductionConfig { passes: 1, ..ReductionConfig::default() };
        Reducer::new(config).unwrap().run(&mut network).unwrap();

        save_state(&network, &path).unwrap();
        let restored = load_state(&path).unwrap();

        assert_eq!(restored.labelled_edges(), network.labelled_edges());
        assert_eq!(restored.cluster_trees(), network.cluster_trees());
        assert_eq!(restored.clusters.len(), network.clusters.len());
    }

    #[test]
    fn results_directory_is_populated() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("out");
        let output_dir = output_dir.to_str().unwrap();

        let mut network = SyntheticTopology::Grid { rows: 3, cols: 3 }.build().unwrap();
        let input = crate::data::profile(&network);
        let config = ReductionConfig::default();
        let report = Reducer::new(config.clone()).unwrap().run(&mut network).unwrap();

        save_results(&network, &config, &input, &report, output_dir).unwrap();

        for name in ["reduced_edges.csv", "clusters.json", "summary.json", STATE_FILE] {
            assert!(Path::new(output_dir).join(name).exists(), "missing {}", name);
        }

        let clusters: Vec<crate::cluster::ClusterTree> = serde_json::from_str(
            &fs::read_to_string(Path::new(output_dir).join("clusters.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(clusters.iter().map(|t| t.size()).sum::<usize>(), 9);

        let edges = fs::read_to_string(Path::new(output_dir).join("reduced_edges.csv")).unwrap();
        assert!(edges.starts_with("from,to\n"));
    }

    fn sorted_edges(network: &Network) -> Vec<(String, String)> {
        let mut edges: Vec<(String, String)> = network
            .labelled_edges()
            .into_iter()
            .map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
            .collect();
        edges.sort();
        edges
    }

    #[test]
    fn reduced_edges_load_back_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().to_str().unwrap();

        let mut network = Network::from_edges([
            ("p\nq", "b"),
            ("b", "Bus 1, North"),
            ("Bus 1, North", "say \"hi\""),
            ("say \"hi\"", "e"),
            ("e", "p\nq"),
        ])
        .unwrap();
        let pair = [network.find("say \"hi\"").unwrap(), network.find("e").unwrap()];
        crate::graph::merge(&mut network, &pair).unwrap();

        save_reduced_edges(&network, output_dir).unwrap();
        let path = dir.path().join("reduced_edges.csv");
        let reloaded = crate::data::load_edge_list(
            path.to_str().unwrap(),
            DEFAULT_FROM_COLUMN,
            DEFAULT_TO_COLUMN,
        )
        .unwrap();

        assert_eq!(sorted_edges(&reloaded), sorted_edges(&network));
        assert_eq!(reloaded.node_count(), network.node_count());
    }

    #[test]
    fn corrupt_state_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STATE_FILE);

        // group #0 names itself as a member
        let clusters: ClusterArena =
            serde_json::from_str(r#"{"nodes":[{"Group":{"members":[0]}}],"sizes":[1]}"#).unwrap();
        let state = NetworkState {
            clusters,
            nodes: vec![ClusterId(0)],
            edges: Vec::new(),
        };
        fs::write(&path, bincode::serialize(&state).unwrap()).unwrap();
        assert!(load_state(&path).is_err());

        // sizes shorter than the cluster table
        let clusters: ClusterArena = serde_json::from_str(
            r#"{"nodes":[{"Leaf":{"label":"a"}},{"Leaf":{"label":"b"}}],"sizes":[1]}"#,
        )
        .unwrap();
        let state = NetworkState {
            clusters,
            nodes: vec![ClusterId(0), ClusterId(1)],
            edges: vec![(ClusterId(0), ClusterId(1))],
        };
        fs::write(&path, bincode::serialize(&state).unwrap()).unwrap();
        assert!(load_state(&path).is_err());
    }
}
