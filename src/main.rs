use anyhow::{bail, Result};
use clap::Parser;
use std::path::Path;

use grid_topology_reducer::cluster::metrics;
use grid_topology_reducer::data::{self, DEFAULT_FROM_COLUMN, DEFAULT_TO_COLUMN};
use grid_topology_reducer::graph::generators::SyntheticTopology;
use grid_topology_reducer::graph::Network;
use grid_topology_reducer::{storage, viz, PassOrder, Reducer, ReductionConfig};

#[derive(Parser, Debug)]
#[clap(
    name = "grid-topology-reducer",
    about = "Collapse chains, grid cells and cliques of a transmission network into nested clusters"
)]
struct Cli {
    /// Path to an edge list (.csv or .parquet)
    #[clap(long)]
    input: Option<String>,

    /// Column holding the first endpoint of each line
    #[clap(long, default_value = DEFAULT_FROM_COLUMN)]
    from_column: String,

    /// Column holding the second endpoint of each line
    #[clap(long, default_value = DEFAULT_TO_COLUMN)]
    to_column: String,

    /// Generate a synthetic topology instead, e.g. grid:6x8, chain:5, star:4x2, cliques:3x4, ring:6
    #[clap(long)]
    synthetic: Option<SyntheticTopology>,

    /// Continue from a state file written by an earlier run
    #[clap(long)]
    resume: Option<String>,

    /// JSON file with reduction settings; overrides the flags below
    #[clap(long)]
    config: Option<String>,

    /// Exact cycle length collapsed by the grid reducer
    #[clap(long, default_value = "4")]
    cycle_length: usize,

    /// Largest clique collapsed by the clique reducer
    #[clap(long, default_value = "4")]
    max_clique_size: usize,

    /// Number of reduction passes
    #[clap(long, default_value = "4")]
    passes: usize,

    /// Reducer order within a pass
    #[clap(long, value_enum, default_value = "chain-grid-clique")]
    order: PassOrder,

    /// Output directory for results
    #[clap(long, default_value = "reduction_results")]
    output_dir: String,

    /// Skip visualization data
    #[clap(long)]
    skip_viz: bool,

    /// Number of worker threads for metrics (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::debug!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = match &args.config {
        Some(path) => {
            log::info!("Reading reduction settings from {}", path);
            serde_json::from_str::<ReductionConfig>(&std::fs::read_to_string(path)?)?
        }
        None => ReductionConfig::new(args.cycle_length, args.max_clique_size, args.passes, args.order),
    };
    let reducer = Reducer::new(config)?;

    log::info!("Starting topology reduction");
    log::info!("Output: {}", args.output_dir);

    // Create output directory
    std::fs::create_dir_all(&args.output_dir)?;

    // 1. Load or generate the network
    let mut network = load_network(&args)?;
    let input = data::profile(&network);
    log::info!(
        "Input has {} nodes, {} edges, {} components",
        input.node_count,
        input.edge_count,
        input.components
    );

    // 2. Reduce
    let report = reducer.run(&mut network)?;
    let summary = metrics::summarize(&network);
    log::info!(
        "Reduced {} locations to {} nodes ({} composites, max depth {})",
        summary.location_count,
        network.node_count(),
        summary.composite_count,
        summary.max_depth
    );

    // 3. Save results
    storage::save_results(&network, reducer.config(), &input, &report, &args.output_dir)?;

    // 4. Generate visualization data if requested
    if !args.skip_viz {
        viz::generate_visualizations(&network, &args.output_dir)?;
    }

    log::info!("Reduction complete. Results saved to {}", args.output_dir);

    Ok(())
}

fn load_network(args: &Cli) -> Result<Network> {
    match (&args.input, &args.synthetic, &args.resume) {
        (Some(path), None, None) => data::load_edge_list(path, &args.from_column, &args.to_column),
        (None, Some(topology), None) => {
            log::info!("Generating synthetic topology {}", topology);
            Ok(topology.build()?)
        }
        (None, None, Some(path)) => storage::load_state(Path::new(path)),
        _ => bail!("exactly one of --input, --synthetic or --resume is required"),
    }
}
