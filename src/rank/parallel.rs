//! Pull-based parallel iteration
//!
//! The push loop writes `next[v]` from many sources, which cannot be split
//! across threads without atomics. Transposing the graph once gives every
//! target its own list of incoming contributions, so each `next[v]` is
//! written by exactly one task and no update can be lost.
//!
//! Incoming lists are filled in source-index order, edge order within a
//! source. That is the order the sequential loop adds contributions in, so
//! both paths produce bit-identical scores.

use super::normalize::SignTotals;
use crate::error::{try_reserve, SignRankResult};
use crate::graph::FrozenGraph;
use rayon::prelude::*;

/// Compressed incoming adjacency with the normalization divisor of each edge
#[derive(Debug)]
pub(crate) struct IncomingPlan {
    /// `offsets[v]..offsets[v + 1]` indexes the incoming entries of `v`
    offsets: Vec<usize>,
    sources: Vec<usize>,
    weights: Vec<f64>,
    divisors: Vec<f64>,
    occupied: Vec<bool>,
}

impl IncomingPlan {
    pub(crate) fn build(graph: &FrozenGraph, totals: &[SignTotals]) -> SignRankResult<Self> {
        let n = graph.node_count();

        let mut offsets = Vec::new();
        try_reserve(&mut offsets, n + 1, "incoming offsets")?;
        offsets.resize(n + 1, 0);

        let mut entries = 0usize;
        for node in graph.nodes() {
            let node_totals = &totals[node.index().get()];
            for edge in node.out_edges() {
                if node_totals.divisor(edge)?.is_some() {
                    offsets[edge.target.get() + 1] += 1;
                    entries += 1;
                }
            }
        }
        for v in 0..n {
            offsets[v + 1] += offsets[v];
        }

        let mut sources = Vec::new();
        let mut weights = Vec::new();
        let mut divisors = Vec::new();
        try_reserve(&mut sources, entries, "incoming sources")?;
        try_reserve(&mut weights, entries, "incoming weights")?;
        try_reserve(&mut divisors, entries, "incoming divisors")?;
        sources.resize(entries, 0);
        weights.resize(entries, 0.0);
        divisors.resize(entries, 0.0);

        let mut cursor = offsets[..n].to_vec();
        for node in graph.nodes() {
            let u = node.index().get();
            for edge in node.out_edges() {
                if let Some(divisor) = totals[u].divisor(edge)? {
                    let slot = &mut cursor[edge.target.get()];
                    sources[*slot] = u;
                    weights[*slot] = edge.weight;
                    divisors[*slot] = divisor;
                    *slot += 1;
                }
            }
        }

        let occupied = graph.slots().iter().map(|s| s.is_occupied()).collect();

        tracing::debug!(nodes = n, entries, "incoming plan built");
        Ok(Self {
            offsets,
            sources,
            weights,
            divisors,
            occupied,
        })
    }

    /// One full iteration: every `next[v]` is reset and accumulated in a
    /// single task. Returning from `for_each` is the iteration barrier.
    pub(crate) fn step(&self, rank: &[f64], next: &mut [f64], damping: f64, base: f64) {
        next.par_iter_mut().enumerate().for_each(|(v, out)| {
            let mut acc = if self.occupied[v] { base } else { 0.0 };
            for k in self.offsets[v]..self.offsets[v + 1] {
                acc += damping * rank[self.sources[k]] * self.weights[k] / self.divisors[k];
            }
            *out = acc;
        });
    }
}
