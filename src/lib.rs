//! Core library functions for the grid topology reducer

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod reduce;
pub mod storage;
pub mod viz;

pub use anyhow::{Result, anyhow};
pub use cluster::{ClusterArena, ClusterId, ClusterTree};
pub use config::{PassOrder, ReductionConfig};
pub use error::ReduceError;
pub use graph::{Network, Topology};
pub use reduce::{Reducer, Stage};
