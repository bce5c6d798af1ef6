//! Cluster bookkeeping for the reduction engine
//!
//! Every node of a [`Topology`](crate::graph::Topology) is a [`ClusterId`]: an
//! index into a [`ClusterArena`]. The arena records, for each id, whether it
//! is a primitive network location or a group produced by a merge, so the
//! nesting of merges can be recovered without parsing labels.

pub mod label;
pub mod metrics;

use crate::error::ReduceError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use label::parse_label;

/// Index of a cluster-tree node inside a [`ClusterArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(pub u32);

impl ClusterId {
    /// Position of this id in the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One entry of the arena
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClusterNode {
    /// An original network location
    Leaf { label: String },

    /// The ordered members of one merge step
    Group { members: Vec<ClusterId> },
}

/// Owned, recursive view of a cluster: a primitive label or an ordered
/// list of sub-clusters.
///
/// Serializes to nested JSON arrays of strings, e.g. `[["a","b"],"c"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClusterTree {
    Leaf(String),
    Group(Vec<ClusterTree>),
}

impl ClusterTree {
    /// Number of primitive locations below this tree
    pub fn size(&self) -> usize {
        match self {
            ClusterTree::Leaf(_) => 1,
            ClusterTree::Group(members) => members.iter().map(ClusterTree::size).sum(),
        }
    }

    /// Nesting depth; a leaf has depth 0
    pub fn depth(&self) -> usize {
        match self {
            ClusterTree::Leaf(_) => 0,
            ClusterTree::Group(members) => {
                1 + members.iter().map(ClusterTree::depth).max().unwrap_or(0)
            }
        }
    }

    /// Primitive labels in left-to-right order
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.size());
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            ClusterTree::Leaf(label) => out.push(label),
            ClusterTree::Group(members) => {
                for member in members {
                    member.collect_leaves(out);
                }
            }
        }
    }
}

impl fmt::Display for ClusterTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterTree::Leaf(label) => f.write_str(label),
            ClusterTree::Group(members) => write!(f, "[{}]", members.iter().join(",")),
        }
    }
}

/// Index-keyed table of every cluster created during a reduction run.
///
/// Ids are handed out in creation order and never reused, which is what
/// keeps node identifiers unique across merges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterArena {
    nodes: Vec<ClusterNode>,

    /// Cached primitive count per id
    sizes: Vec<usize>,
}

impl ClusterArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids handed out so far
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: ClusterId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn get(&self, id: ClusterId) -> Option<&ClusterNode> {
        self.nodes.get(id.index())
    }

    /// Register a primitive location
    pub fn push_leaf(&mut self, label: impl Into<String>) -> ClusterId {
        let id = self.next_id();
        self.nodes.push(ClusterNode::Leaf { label: label.into() });
        self.sizes.push(1);
        id
    }

    /// Register one merge step over existing ids, preserving member order
    pub fn push_group(&mut self, members: &[ClusterId]) -> Result<ClusterId, ReduceError> {
        if members.is_empty() {
            return Err(ReduceError::EmptyMotif);
        }
        if let Some(&missing) = members.iter().find(|&&m| !self.contains(m)) {
            return Err(ReduceError::UnknownNode(missing));
        }

        let size = members.iter().map(|&m| self.sizes[m.index()]).sum();
        let id = self.next_id();
        self.nodes.push(ClusterNode::Group { members: members.to_vec() });
        self.sizes.push(size);
        Ok(id)
    }

    /// Register an input label.
    ///
    /// Plain labels become leaves. Bracketed labels written by an earlier
    /// run (`[l1,[l2,l3]]`) are rebuilt as the equivalent nested groups so
    /// their size reflects the locations they stand for.
    pub fn intern(&mut self, label: &str) -> Result<ClusterId, ReduceError> {
        let tree = parse_label(label)?;
        Ok(self.insert_tree(&tree))
    }

    /// Register an already parsed tree, leaves first
    pub fn insert_tree(&mut self, tree: &ClusterTree) -> ClusterId {
        match tree {
            ClusterTree::Leaf(label) => self.push_leaf(label.clone()),
            ClusterTree::Group(members) => {
                let member_ids: Vec<ClusterId> =
                    members.iter().map(|member| self.insert_tree(member)).collect();
                let size = member_ids.iter().map(|&m| self.sizes[m.index()]).sum();
                let id = self.next_id();
                self.nodes.push(ClusterNode::Group { members: member_ids });
                self.sizes.push(size);
                id
            }
        }
    }

    /// Number of primitive locations represented by `id` (0 if unknown)
    pub fn size(&self, id: ClusterId) -> usize {
        self.sizes.get(id.index()).copied().unwrap_or(0)
    }

    /// Total size of a set of ids
    pub fn total_size(&self, ids: &[ClusterId]) -> usize {
        ids.iter().map(|&id| self.size(id)).sum()
    }

    /// Deterministic label of `id`: the input label for leaves,
    /// `[member,member,...]` for groups
    pub fn label(&self, id: ClusterId) -> String {
        match self.get(id) {
            Some(ClusterNode::Leaf { label }) => label.clone(),
            Some(ClusterNode::Group { members }) => {
                format!("[{}]", members.iter().map(|&m| self.label(m)).join(","))
            }
            None => id.to_string(),
        }
    }

    /// Owned nested view of `id`
    pub fn tree(&self, id: ClusterId) -> Option<ClusterTree> {
        match self.get(id)? {
            ClusterNode::Leaf { label } => Some(ClusterTree::Leaf(label.clone())),
            ClusterNode::Group { members } => members
                .iter()
                .map(|&m| self.tree(m))
                .collect::<Option<Vec<_>>>()
                .map(ClusterTree::Group),
        }
    }

    /// Check that the arena is a well-formed merge history.
    ///
    /// Every group must have members created before it, and the cached sizes
    /// must match the recomputed ones. Arenas built through `push_*` always
    /// pass; this guards arenas read back from disk.
    pub fn validate(&self) -> Result<(), ReduceError> {
        if self.sizes.len() != self.nodes.len() {
            return Err(ReduceError::CorruptArena(format!(
                "{} sizes for {} clusters",
                self.sizes.len(),
                self.nodes.len()
            )));
        }

        for (index, node) in self.nodes.iter().enumerate() {
            let expected = match node {
                ClusterNode::Leaf { .. } => 1,
                ClusterNode::Group { members } => {
                    if members.is_empty() {
                        return Err(ReduceError::CorruptArena(format!(
                            "group #{} has no members",
                            index
                        )));
                    }
                    if let Some(member) = members.iter().find(|m| m.index() >= index) {
                        return Err(ReduceError::CorruptArena(format!(
                            "group #{} refers to later cluster {}",
                            index, member
                        )));
                    }
                    members.iter().map(|m| self.sizes[m.index()]).sum()
                }
            };

            if self.sizes[index] != expected {
                return Err(ReduceError::CorruptArena(format!(
                    "cluster #{} has size {} but represents {} locations",
                    index, self.sizes[index], expected
                )));
            }
        }

        Ok(())
    }

    fn next_id(&self) -> ClusterId {
        ClusterId(self.nodes.len() as u32)
    }
}
