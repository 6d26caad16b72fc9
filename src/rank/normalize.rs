//! Per-sign outgoing weight totals
//!
//! Positive and negative out-weights of a node are normalized separately:
//! a follow is divided by the node's total follow weight, a block by the
//! node's total block magnitude.

use crate::error::{try_reserve, SignRankError, SignRankResult};
use crate::graph::{Edge, FrozenGraph, Sign};

/// Outgoing weight of one node split by sign group
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SignTotals {
    /// Sum of positive weights
    pub positive: f64,
    /// Sum of absolute values of negative weights
    pub negative: f64,
}

impl SignTotals {
    pub fn from_edges(edges: &[Edge]) -> Self {
        edges.iter().fold(Self::default(), |mut totals, edge| {
            match edge.sign() {
                Some(Sign::Positive) => totals.positive += edge.weight,
                Some(Sign::Negative) => totals.negative -= edge.weight,
                None => {}
            }
            totals
        })
    }

    /// Divisor normalizing `edge` within its sign group
    ///
    /// `None` for zero-weight edges, which take part in neither group.
    pub fn divisor(&self, edge: &Edge) -> SignRankResult<Option<f64>> {
        let (sign, total) = match edge.sign() {
            None => return Ok(None),
            Some(Sign::Positive) => (Sign::Positive, self.positive),
            Some(Sign::Negative) => (Sign::Negative, self.negative),
        };
        if total > 0.0 {
            Ok(Some(total))
        } else {
            Err(SignRankError::Logic(format!(
                "edge to {} with weight {} has an empty {:?} group",
                edge.target, edge.weight, sign
            )))
        }
    }
}

/// Totals for every slot of the graph; placeholders get zero totals.
///
/// A group total that overflows to infinity would turn every share of that
/// group into zero, so it is rejected as a validation error.
pub fn sign_totals(graph: &FrozenGraph) -> SignRankResult<Vec<SignTotals>> {
    let mut totals = Vec::new();
    try_reserve(&mut totals, graph.node_count(), "sign totals")?;
    totals.resize(graph.node_count(), SignTotals::default());
    for node in graph.nodes() {
        let node_totals = SignTotals::from_edges(node.out_edges());
        if !node_totals.positive.is_finite() || !node_totals.negative.is_finite() {
            return Err(SignRankError::Validation(format!(
                "out-weights of node {} overflow (positive {}, negative {})",
                node.index(),
                node_totals.positive,
                node_totals.negative
            )));
        }
        totals[node.index().get()] = node_totals;
    }
    Ok(totals)
}
