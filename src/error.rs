//! Error types for the reduction core

use crate::cluster::ClusterId;
use thiserror::Error;

/// Errors raised by the graph model, the merge operator and the reducers.
///
/// Every variant is fatal to the reduction run that raised it. Finding no
/// motif is never an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReduceError {
    /// A merge was requested with no members
    #[error("cannot merge an empty motif")]
    EmptyMotif,

    /// A node id does not exist in the graph (or the cluster arena)
    #[error("node {0} is not present in the graph")]
    UnknownNode(ClusterId),

    /// A node id appears more than once in a motif
    #[error("node {0} appears more than once in the motif")]
    DuplicateMember(ClusterId),

    /// A reduction parameter is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An input label could not be parsed as a cluster label
    #[error("malformed cluster label '{label}': {reason}")]
    MalformedLabel { label: String, reason: String },

    /// A deserialized cluster arena is not a valid merge history
    #[error("corrupt cluster arena: {0}")]
    CorruptArena(String),
}
