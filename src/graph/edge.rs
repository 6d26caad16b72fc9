//! Signed edge representation

use super::node::NodeIndex;
use serde::{Deserialize, Serialize};

/// Which normalization group an edge weight belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    /// Endorsement (e.g. a follow)
    Positive,
    /// Distrust (e.g. a block)
    Negative,
}

/// A directed edge owned by its source node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Destination node
    pub target: NodeIndex,
    /// Signed strength; magnitude encodes strength on both sides
    pub weight: f64,
}

impl Edge {
    pub fn new(target: NodeIndex, weight: f64) -> Self {
        Self { target, weight }
    }

    /// Sign group of this edge. Zero weights belong to neither group.
    pub fn sign(&self) -> Option<Sign> {
        if self.weight > 0.0 {
            Some(Sign::Positive)
        } else if self.weight < 0.0 {
            Some(Sign::Negative)
        } else {
            None
        }
    }
}
