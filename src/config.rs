//! Configuration management for the topology reducer

use crate::error::ReduceError;
use crate::reduce::Stage;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Order in which the reducers run inside one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PassOrder {
    /// Chains, then grid cells, then cliques
    #[default]
    ChainGridClique,

    /// Cliques first, then chains and grid cells
    CliqueChainGrid,
}

impl PassOrder {
    pub fn stages(self) -> &'static [Stage] {
        match self {
            PassOrder::ChainGridClique => &[Stage::Chain, Stage::Grid, Stage::Clique],
            PassOrder::CliqueChainGrid => &[Stage::Clique, Stage::Chain, Stage::Grid],
        }
    }
}

/// Parameters of a reduction run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReductionConfig {
    /// Exact length of the cycles collapsed by the grid reducer
    pub cycle_length: usize,

    /// Largest clique the clique reducer will collapse
    pub max_clique_size: usize,

    /// Number of passes over the graph
    pub passes: usize,

    /// Reducer order within a pass
    pub order: PassOrder,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            cycle_length: 4,
            max_clique_size: 4,
            passes: 4,
            order: PassOrder::ChainGridClique,
        }
    }
}

impl ReductionConfig {
    /// Create a new configuration with custom values
    pub fn new(cycle_length: usize, max_clique_size: usize, passes: usize, order: PassOrder) -> Self {
        Self {
            cycle_length,
            max_clique_size,
            passes,
            order,
        }
    }

    /// Check every parameter is in range
    pub fn validate(&self) -> Result<(), ReduceError> {
        if self.cycle_length < 3 {
            return Err(ReduceError::InvalidConfig(format!(
                "cycle length must be at least 3, got {}",
                self.cycle_length
            )));
        }
        if self.max_clique_size < 3 {
            return Err(ReduceError::InvalidConfig(format!(
                "maximum clique size must be at least 3, got {}",
                self.max_clique_size
            )));
        }
        if self.passes == 0 {
            return Err(ReduceError::InvalidConfig("at least one pass is required".into()));
        }
        Ok(())
    }
}
