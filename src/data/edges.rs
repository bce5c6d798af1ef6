//! Edge-list loading for transmission topologies

use crate::graph::{Network, NetworkBuilder};
use anyhow::{anyhow, bail, Result};
use polars::prelude::*;
use std::path::Path;

/// Column holding the first endpoint of each line
pub const DEFAULT_FROM_COLUMN: &str = "from";

/// Column holding the second endpoint of each line
pub const DEFAULT_TO_COLUMN: &str = "to";

/// Load an edge list from a CSV or Parquet file.
///
/// Every row is one undirected line between two location labels; any other
/// columns (capacities and the like) are ignored.
pub fn load_edge_list(path: &str, from_column: &str, to_column: &str) -> Result<Network> {
    log::info!("Reading edge list: {}", path);

    // Check if the file exists
    if !Path::new(path).exists() {
        return Err(anyhow!("File not found: {}", path));
    }

    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    let df = match extension.as_str() {
        "parquet" => LazyFrame::scan_parquet(path, Default::default())?
            .select([col(from_column), col(to_column)])
            .collect()?,
        "csv" => CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.into()))?
            .finish()?,
        _ => bail!(
            "unsupported file extension '{}'; use .csv or .parquet",
            extension
        ),
    };

    log::debug!("File schema: {:?}", df.schema());
    network_from_frame(&df, from_column, to_column)
}

/// Build a network from two label columns of a data frame.
///
/// Labels of any type are cast to strings and trimmed. Rows with a missing
/// endpoint are skipped.
pub fn network_from_frame(df: &DataFrame, from_column: &str, to_column: &str) -> Result<Network> {
    let from = df.column(from_column)?.cast(&DataType::String)?;
    let to = df.column(to_column)?.cast(&DataType::String)?;
    let from = from.str()?;
    let to = to.str()?;

    let row_count = df.height();
    log::info!("Processing {} transmission lines", row_count);

    let mut builder = NetworkBuilder::with_capacity(row_count);
    let mut skipped = 0;
    for i in 0..row_count {
        match (from.get(i), to.get(i)) {
            (Some(a), Some(b)) => builder.add_edge(a.trim(), b.trim())?,
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {} rows with a missing endpoint", skipped);
    }

    let network = builder.build();
    log::info!(
        "Loaded graph with {} nodes and {} edges",
        network.node_count(),
        network.edge_count()
    );

    Ok(network)
}
