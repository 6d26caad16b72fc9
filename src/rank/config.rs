//! Propagation parameters and seed configuration

use crate::error::{SignRankError, SignRankResult};
use crate::graph::NodeIndex;
use serde::{Deserialize, Serialize};

/// Parameters controlling a propagation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationConfig {
    /// Number of power iterations (upper bound when `tolerance` is set)
    pub iterations: usize,
    /// Fraction of a node's rank redistributed through its edges
    pub damping: f64,
    /// Stop early once the L1 change between iterations drops below this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    /// Run iterations on the rayon pool (requires the `parallel` feature)
    pub parallel: bool,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            iterations: 20,
            damping: 0.85,
            tolerance: None,
            parallel: false,
        }
    }
}

impl PropagationConfig {
    pub fn new(iterations: usize, damping: f64) -> Self {
        Self {
            iterations,
            damping,
            ..Self::default()
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Reject damping outside the open interval (0, 1) and malformed tolerances
    pub fn validate(&self) -> SignRankResult<()> {
        if !self.damping.is_finite() || self.damping <= 0.0 || self.damping >= 1.0 {
            return Err(SignRankError::Validation(format!(
                "damping must lie strictly between 0 and 1, got {}",
                self.damping
            )));
        }
        if let Some(tolerance) = self.tolerance {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(SignRankError::Validation(format!(
                    "tolerance must be a finite non-negative number, got {}",
                    tolerance
                )));
            }
        }
        Ok(())
    }
}

/// Trust anchors applied to the prior before the first iteration
///
/// Good seeds start at `+1`, bad seeds at `-1`. Bad seeds are applied after
/// good seeds, so an index present in both lists starts at `-1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSet {
    #[serde(default)]
    good: Vec<NodeIndex>,
    #[serde(default)]
    bad: Vec<NodeIndex>,
}

impl SeedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_good(mut self, seeds: impl IntoIterator<Item = NodeIndex>) -> Self {
        self.good.extend(seeds);
        self
    }

    pub fn with_bad(mut self, seeds: impl IntoIterator<Item = NodeIndex>) -> Self {
        self.bad.extend(seeds);
        self
    }

    pub fn add_good(&mut self, index: NodeIndex) {
        self.good.push(index);
    }

    pub fn add_bad(&mut self, index: NodeIndex) {
        self.bad.push(index);
    }

    pub fn good(&self) -> &[NodeIndex] {
        &self.good
    }

    pub fn bad(&self) -> &[NodeIndex] {
        &self.bad
    }

    pub fn is_empty(&self) -> bool {
        self.good.is_empty() && self.bad.is_empty()
    }

    /// Every seed must name a slot of the graph being ranked
    pub fn validate(&self, node_count: usize) -> SignRankResult<()> {
        let out_of_range = self
            .good
            .iter()
            .chain(&self.bad)
            .find(|index| index.get() >= node_count);
        match out_of_range {
            Some(index) => Err(SignRankError::Validation(format!(
                "seed index {} is outside the graph ({} nodes)",
                index, node_count
            ))),
            None => Ok(()),
        }
    }
}
