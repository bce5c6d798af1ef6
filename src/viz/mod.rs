//! Visualization data export module
//!
//! Writes the reduced graph in formats that external graph tools can draw.
//! Nothing here renders images.

use crate::graph::Network;
use anyhow::Result;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Generate visualization data for the reduced network
pub fn generate_visualizations(network: &Network, output_dir: &str) -> Result<()> {
    log::info!("Generating visualization data for {} nodes", network.node_count());

    // Create visualizations directory
    let viz_dir = Path::new(output_dir).join("visualizations");
    fs::create_dir_all(&viz_dir)?;

    write_graphml(network, &viz_dir.join("reduced_network.graphml"))?;
    write_size_distribution(network, &viz_dir.join("size_distribution.csv"))?;

    log::info!("Visualization data generated successfully");

    Ok(())
}

/// Write the reduced graph as GraphML with label, size and depth per node
pub fn write_graphml(network: &Network, path: &Path) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);

    writeln!(file, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(file, "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\">")?;
    writeln!(file, "  <key id=\"label\" for=\"node\" attr.name=\"label\" attr.type=\"string\"/>")?;
    writeln!(file, "  <key id=\"size\" for=\"node\" attr.name=\"size\" attr.type=\"int\"/>")?;
    writeln!(file, "  <key id=\"depth\" for=\"node\" attr.name=\"depth\" attr.type=\"int\"/>")?;
    writeln!(file, "  <graph id=\"G\" edgedefault=\"undirected\">")?;

    for node in network.topology.nodes() {
        let depth = network.clusters.tree(node).map_or(0, |t| t.depth());
        writeln!(file, "    <node id=\"n{}\">", node.0)?;
        writeln!(file, "      <data key=\"label\">{}</data>", xml_escape(&network.label(node)))?;
        writeln!(file, "      <data key=\"size\">{}</data>", network.clusters.size(node))?;
        writeln!(file, "      <data key=\"depth\">{}</data>", depth)?;
        writeln!(file, "    </node>")?;
    }

    for (edge_id, (a, b)) in network.topology.edges().into_iter().enumerate() {
        writeln!(
            file,
            "    <edge id=\"e{}\" source=\"n{}\" target=\"n{}\"/>",
            edge_id, a.0, b.0
        )?;
    }

    writeln!(file, "  </graph>")?;
    writeln!(file, "</graphml>")?;
    file.flush()?;

    Ok(())
}

/// Write how many reduced nodes represent each number of locations
fn write_size_distribution(network: &Network, path: &Path) -> Result<()> {
    let mut counts = std::collections::BTreeMap::new();
    for node in network.topology.nodes() {
        *counts.entry(network.clusters.size(node)).or_insert(0usize) += 1;
    }

    let mut file = File::create(path)?;
    writeln!(file, "size,count")?;
    for (size, count) in counts {
        writeln!(file, "{},{}", size, count)?;
    }

    Ok(())
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
