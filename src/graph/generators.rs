//! Synthetic transmission topologies for case studies
//!
//! Locations are labelled `l0`, `l1`, ... in generation order.

use crate::error::ReduceError;
use crate::graph::{Network, NetworkBuilder};
use std::fmt;
use std::str::FromStr;

/// Shape of a generated network, parsed from strings such as `grid:6x8`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticTopology {
    /// `grid:RxC` rectangular lattice, row-major labels
    Grid { rows: usize, cols: usize },

    /// `chain:N` straight line
    Chain { length: usize },

    /// `ring:N` simple cycle
    Ring { length: usize },

    /// `star:AxL` hub `l0` with `A` arms of `L` locations each
    Star { arms: usize, arm_length: usize },

    /// `cliques:CxS` `C` fully meshed groups of `S` locations whose first
    /// members are also fully meshed with each other
    Cliques { count: usize, size: usize },
}

impl SyntheticTopology {
    /// Number of locations the topology will contain
    pub fn location_count(&self) -> usize {
        match *self {
            SyntheticTopology::Grid { rows, cols } => rows * cols,
            SyntheticTopology::Chain { length } | SyntheticTopology::Ring { length } => length,
            SyntheticTopology::Star { arms, arm_length } => arms * arm_length + 1,
            SyntheticTopology::Cliques { count, size } => count * size,
        }
    }

    /// Check the dimensions: every count is at least 1 and a ring has at
    /// least 3 locations
    pub fn validate(&self) -> Result<(), ReduceError> {
        let dims = match *self {
            SyntheticTopology::Grid { rows, cols } => vec![rows, cols],
            SyntheticTopology::Chain { length } | SyntheticTopology::Ring { length } => vec![length],
            SyntheticTopology::Star { arms, arm_length } => vec![arms, arm_length],
            SyntheticTopology::Cliques { count, size } => vec![count, size],
        };

        if dims.contains(&0) {
            return Err(self.invalid("dimensions must be positive integers"));
        }
        if let SyntheticTopology::Ring { length } = *self {
            if length < 3 {
                return Err(self.invalid("a ring needs at least 3 locations"));
            }
        }

        Ok(())
    }

    fn invalid(&self, reason: &str) -> ReduceError {
        ReduceError::InvalidConfig(format!("topology '{}': {}", self, reason))
    }

    /// Generate the network
    pub fn build(&self) -> Result<Network, ReduceError> {
        self.validate()?;

        let mut builder = NetworkBuilder::with_capacity(self.location_count());
        let label = |i: usize| format!("l{}", i);

        // Register every location up front so ids follow label order
        for i in 0..self.location_count() {
            builder.get_or_create_node(&label(i))?;
        }

        match *self {
            SyntheticTopology::Grid { rows, cols } => {
                for r in 0..rows {
                    for c in 0..cols {
                        let here = r * cols + c;
                        if c + 1 < cols {
                            builder.add_edge(&label(here), &label(here + 1))?;
                        }
                        if r + 1 < rows {
                            builder.add_edge(&label(here), &label(here + cols))?;
                        }
                    }
                }
            }
            SyntheticTopology::Chain { length } => {
                for i in 1..length {
                    builder.add_edge(&label(i - 1), &label(i))?;
                }
            }
            SyntheticTopology::Ring { length } => {
                for i in 1..length {
                    builder.add_edge(&label(i - 1), &label(i))?;
                }
                builder.add_edge(&label(length - 1), &label(0))?;
            }
            SyntheticTopology::Star { arms, arm_length } => {
                for arm in 0..arms {
                    let first = 1 + arm * arm_length;
                    builder.add_edge(&label(0), &label(first))?;
                    for x in 1..arm_length {
                        builder.add_edge(&label(first + x - 1), &label(first + x))?;
                    }
                }
            }
            SyntheticTopology::Cliques { count, size } => {
                for group in 0..count {
                    let start = group * size;
                    for i in start..start + size {
                        for j in i + 1..start + size {
                            builder.add_edge(&label(i), &label(j))?;
                        }
                    }
                }
                for g in 0..count {
                    for h in g + 1..count {
                        builder.add_edge(&label(g * size), &label(h * size))?;
                    }
                }
            }
        }

        Ok(builder.build())
    }
}

impl fmt::Display for SyntheticTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SyntheticTopology::Grid { rows, cols } => write!(f, "grid:{}x{}", rows, cols),
            SyntheticTopology::Chain { length } => write!(f, "chain:{}", length),
            SyntheticTopology::Ring { length } => write!(f, "ring:{}", length),
            SyntheticTopology::Star { arms, arm_length } => write!(f, "star:{}x{}", arms, arm_length),
            SyntheticTopology::Cliques { count, size } => write!(f, "cliques:{}x{}", count, size),
        }
    }
}

impl FromStr for SyntheticTopology {
    type Err = ReduceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ReduceError::InvalidConfig(format!("topology '{}': {}", s, reason));

        let (kind, dims) = s
            .split_once(':')
            .ok_or_else(|| invalid("expected <kind>:<dimensions>"))?;

        let numbers = dims
            .split('x')
            .map(|part| part.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid("dimensions must be positive integers"))?;

        let topology = match (kind.trim(), numbers.as_slice()) {
            ("grid", &[rows, cols]) => SyntheticTopology::Grid { rows, cols },
            ("chain", &[length]) => SyntheticTopology::Chain { length },
            ("ring", &[length]) => SyntheticTopology::Ring { length },
            ("star", &[arms, arm_length]) => SyntheticTopology::Star { arms, arm_length },
            ("cliques", &[count, size]) => SyntheticTopology::Cliques { count, size },
            _ => return Err(invalid("unknown kind or wrong number of dimensions")),
        };

        topology.validate()?;
        Ok(topology)
    }
}
