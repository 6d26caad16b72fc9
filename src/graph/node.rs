//! Node representation in the signed graph

use super::edge::Edge;
use crate::error::SignRankError;
use serde::{Deserialize, Serialize};

/// Dense, zero-based index of a node
///
/// Indices are assigned by the caller (typically an identifier registry).
/// Serializes as a plain integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Create an index from a raw slot position
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw slot position
    pub const fn get(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for NodeIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<u32> for NodeIndex {
    fn from(index: u32) -> Self {
        Self(index as usize)
    }
}

impl TryFrom<i64> for NodeIndex {
    type Error = SignRankError;

    /// Negative indices are rejected instead of being reinterpreted as sizes.
    fn try_from(index: i64) -> Result<Self, Self::Error> {
        usize::try_from(index).map(Self).map_err(|_| {
            SignRankError::Validation(format!("node index must be non-negative, got {}", index))
        })
    }
}

/// A node and its outgoing edges
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    index: NodeIndex,
    out_edges: Vec<Edge>,
}

impl Node {
    /// Create a node with no outgoing edges
    pub fn new(index: NodeIndex) -> Self {
        Self {
            index,
            out_edges: Vec::new(),
        }
    }

    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Outgoing edges in insertion order
    pub fn out_edges(&self) -> &[Edge] {
        &self.out_edges
    }

    pub fn out_degree(&self) -> usize {
        self.out_edges.len()
    }

    /// A dangling node has nothing to redistribute
    pub fn is_dangling(&self) -> bool {
        self.out_edges.is_empty()
    }

    pub(super) fn out_edges_mut(&mut self) -> &mut Vec<Edge> {
        &mut self.out_edges
    }
}

/// One position of the dense node array
///
/// Skipped indices are held as `Vacant` placeholders so every index below
/// `node_count()` resolves to a slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Slot {
    #[default]
    Vacant,
    Occupied(Node),
}

impl Slot {
    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(_))
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant => None,
        }
    }

    pub(super) fn as_node_mut(&mut self) -> Option<&mut Node> {
        match self {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant => None,
        }
    }
}
