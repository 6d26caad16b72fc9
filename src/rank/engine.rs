//! SignedPageRank: fixed-iteration signed power iteration

use super::cancel::CancellationToken;
use super::config::{PropagationConfig, SeedSet};
use super::normalize::{sign_totals, SignTotals};
use crate::error::{alloc_scores, SignRankError, SignRankResult};
use crate::graph::FrozenGraph;
use serde::Serialize;
use std::time::Instant;

#[cfg(feature = "parallel")]
use super::parallel::IncomingPlan;

/// Result of a propagation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Propagation {
    /// One score per node index, placeholders included
    pub scores: Vec<f64>,
    /// Iterations actually executed
    pub iterations_run: usize,
    /// L1 change produced by the last iteration, if any ran
    pub last_delta: Option<f64>,
    /// Whether the tolerance stopped the run before the iteration limit
    pub converged: bool,
}

/// The signed propagation engine
///
/// Scores start at the uniform prior `1/N`, with good seeds set to `+1` and
/// bad seeds to `-1`. Each iteration every node keeps the teleport baseline
/// `(1 - damping)/N` and receives `damping * rank[u] * w / total(u, sign(w))`
/// from each in-edge `u -> v` of weight `w`. Scores are never renormalized.
#[derive(Debug, Clone, Default)]
pub struct SignedPageRank {
    config: PropagationConfig,
}

impl SignedPageRank {
    pub fn new(config: PropagationConfig) -> Self {
        Self { config }
    }

    /// Propagate scores over `graph` starting from `seeds`
    pub fn propagate(&self, graph: &FrozenGraph, seeds: &SeedSet) -> SignRankResult<Propagation> {
        self.run(graph, seeds, None)
    }

    /// Like [`propagate`](Self::propagate), polling `cancel` between iterations
    pub fn propagate_with_cancel(
        &self,
        graph: &FrozenGraph,
        seeds: &SeedSet,
        cancel: &CancellationToken,
    ) -> SignRankResult<Propagation> {
        self.run(graph, seeds, Some(cancel))
    }

    fn run(
        &self,
        graph: &FrozenGraph,
        seeds: &SeedSet,
        cancel: Option<&CancellationToken>,
    ) -> SignRankResult<Propagation> {
        self.config.validate()?;
        let n = graph.node_count();
        seeds.validate(n)?;

        let mut rank = seeded_prior(n, seeds)?;
        if n == 0 || self.config.iterations == 0 {
            return Ok(Propagation {
                scores: rank,
                iterations_run: 0,
                last_delta: None,
                converged: false,
            });
        }

        let totals = sign_totals(graph)?;
        let stepper = Stepper::new(graph, &totals, self.config.parallel)?;
        // Reused accumulator; every entry is overwritten at the start of a step.
        let mut next = alloc_scores(n, 0.0)?;

        let damping = self.config.damping;
        let base = (1.0 - damping) / n as f64;

        tracing::info!(
            nodes = n,
            edges = graph.edge_count(),
            iterations = self.config.iterations,
            damping,
            parallel = stepper.is_parallel(),
            "propagation started"
        );
        let started = Instant::now();

        let mut iterations_run = 0;
        let mut last_delta = None;
        let mut converged = false;

        for iteration in 0..self.config.iterations {
            if cancel.is_some_and(CancellationToken::is_cancelled) {
                tracing::warn!(completed = iteration, "propagation cancelled");
                return Err(SignRankError::Cancelled {
                    completed: iteration,
                });
            }

            stepper.step(graph, &totals, &rank, &mut next, damping, base)?;
            let delta = l1_delta(&rank, &next);
            std::mem::swap(&mut rank, &mut next);

            iterations_run += 1;
            last_delta = Some(delta);
            tracing::debug!(iteration = iterations_run, delta, "iteration complete");

            if let Some(tolerance) = self.config.tolerance {
                if delta < tolerance {
                    converged = true;
                    break;
                }
            }
        }

        tracing::info!(
            iterations_run,
            converged,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "propagation finished"
        );

        Ok(Propagation {
            scores: rank,
            iterations_run,
            last_delta,
            converged,
        })
    }
}

/// Run `iterations` fixed iterations with the given damping.
///
/// Convenience over [`SignedPageRank`] for callers that only need scores.
pub fn propagate(
    graph: &FrozenGraph,
    seeds: &SeedSet,
    iterations: usize,
    damping: f64,
) -> SignRankResult<Vec<f64>> {
    SignedPageRank::new(PropagationConfig::new(iterations, damping))
        .propagate(graph, seeds)
        .map(|outcome| outcome.scores)
}

/// Uniform prior with seed overrides applied once
fn seeded_prior(n: usize, seeds: &SeedSet) -> SignRankResult<Vec<f64>> {
    let mut rank = alloc_scores(n, 1.0 / n as f64)?;
    for index in seeds.good() {
        rank[index.get()] = 1.0;
    }
    for index in seeds.bad() {
        rank[index.get()] = -1.0;
    }
    Ok(rank)
}

fn l1_delta(previous: &[f64], current: &[f64]) -> f64 {
    previous
        .iter()
        .zip(current)
        .map(|(a, b)| (a - b).abs())
        .sum()
}

enum Stepper {
    Sequential,
    #[cfg(feature = "parallel")]
    Parallel(IncomingPlan),
}

impl Stepper {
    fn new(graph: &FrozenGraph, totals: &[SignTotals], parallel: bool) -> SignRankResult<Self> {
        if !parallel {
            return Ok(Stepper::Sequential);
        }
        #[cfg(feature = "parallel")]
        {
            Ok(Stepper::Parallel(IncomingPlan::build(graph, totals)?))
        }
        #[cfg(not(feature = "parallel"))]
        {
            let _ = (graph, totals);
            tracing::warn!("built without the `parallel` feature; running sequentially");
            Ok(Stepper::Sequential)
        }
    }

    fn is_parallel(&self) -> bool {
        !matches!(self, Stepper::Sequential)
    }

    fn step(
        &self,
        graph: &FrozenGraph,
        totals: &[SignTotals],
        rank: &[f64],
        next: &mut [f64],
        damping: f64,
        base: f64,
    ) -> SignRankResult<()> {
        match self {
            Stepper::Sequential => push_step(graph, totals, rank, next, damping, base),
            #[cfg(feature = "parallel")]
            Stepper::Parallel(plan) => {
                plan.step(rank, next, damping, base);
                Ok(())
            }
        }
    }
}

/// One sequential iteration: reset to the baseline, then push every
/// node's share along its out-edges.
fn push_step(
    graph: &FrozenGraph,
    totals: &[SignTotals],
    rank: &[f64],
    next: &mut [f64],
    damping: f64,
    base: f64,
) -> SignRankResult<()> {
    for (slot, out) in graph.slots().iter().zip(next.iter_mut()) {
        *out = if slot.is_occupied() { base } else { 0.0 };
    }

    for node in graph.nodes() {
        let u = node.index().get();
        let share = damping * rank[u];
        for edge in node.out_edges() {
            if let Some(divisor) = totals[u].divisor(edge)? {
                next[edge.target.get()] += share * edge.weight / divisor;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphStore, NodeIndex};

    fn idx(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn graph(edges: &[(usize, usize, f64)]) -> FrozenGraph {
        let mut store = GraphStore::new();
        for &(src, dest, weight) in edges {
            store.add_edge(idx(src), idx(dest), weight).unwrap();
        }
        store.freeze()
    }

    #[test]
    fn empty_graph_yields_empty_scores() {
        let scores = propagate(&GraphStore::new().freeze(), &SeedSet::new(), 10, 0.85).unwrap();
        assert!(scores.is_empty());
    }

    #[test]
    fn zero_iterations_returns_seeded_prior() {
        let g = graph(&[(0, 1, 1.0), (1, 2, -1.0), (2, 3, 1.0)]);
        let seeds = SeedSet::new().with_good([idx(0)]).with_bad([idx(2)]);
        let scores = propagate(&g, &seeds, 0, 0.85).unwrap();
        assert_eq!(scores, vec![1.0, 0.25, -1.0, 0.25]);
    }

    #[test]
    fn bad_seed_wins_over_good_seed() {
        let g = graph(&[(0, 1, 1.0)]);
        let seeds = SeedSet::new().with_good([idx(1)]).with_bad([idx(1)]);
        let scores = propagate(&g, &seeds, 0, 0.85).unwrap();
        assert_eq!(scores[1], -1.0);
    }

    #[test]
    fn seeds_are_not_repinned() {
        // 0 -> 1, seed 0 as good: after one step node 0 falls to the baseline.
        let g = graph(&[(0, 1, 1.0)]);
        let seeds = SeedSet::new().with_good([idx(0)]);
        let scores = propagate(&g, &seeds, 1, 0.5).unwrap();
        assert!((scores[0] - 0.25).abs() < 1e-12);
        assert!((scores[1] - (0.25 + 0.5)).abs() < 1e-12);
    }

    #[test]
    fn overflowing_out_weight_is_rejected() {
        let g = graph(&[(0, 1, 1e308), (0, 2, 1e308)]);
        let seeds = SeedSet::new().with_good([idx(0)]);
        let err = propagate(&g, &seeds, 1, 0.85).unwrap_err();
        assert!(matches!(err, SignRankError::Validation(_)));
    }

    #[test]
    fn invalid_damping_fails_before_work() {
        let g = graph(&[(0, 1, 1.0)]);
        let err = propagate(&g, &SeedSet::new(), 3, 1.0).unwrap_err();
        assert!(matches!(err, SignRankError::Validation(_)));
    }

    #[test]
    fn out_of_range_seed_is_rejected() {
        let g = graph(&[(0, 1, 1.0)]);
        let seeds = SeedSet::new().with_good([idx(5)]);
        assert!(matches!(
            propagate(&g, &seeds, 1, 0.85),
            Err(SignRankError::Validation(_))
        ));
    }

    #[test]
    fn zero_weight_edges_have_no_effect() {
        let with_zero = graph(&[(0, 1, 1.0), (0, 2, 0.0), (2, 0, 1.0)]);
        let without = graph(&[(0, 1, 1.0), (2, 0, 1.0)]);
        let a = propagate(&with_zero, &SeedSet::new(), 4, 0.85).unwrap();
        let b = propagate(&without, &SeedSet::new(), 4, 0.85).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn all_zero_weights_leave_only_baseline() {
        let g = graph(&[(0, 1, 0.0), (1, 0, 0.0)]);
        let scores = propagate(&g, &SeedSet::new(), 3, 0.85).unwrap();
        for score in scores {
            assert!((score - 0.15 / 2.0).abs() < 1e-15);
        }
    }

    #[test]
    fn placeholders_drop_to_zero_after_an_iteration() {
        let g = graph(&[(0, 3, 1.0)]);
        let scores = propagate(&g, &SeedSet::new(), 1, 0.85).unwrap();
        assert_eq!(scores.len(), 4);
        assert_eq!(scores[1], 0.0);
        assert_eq!(scores[2], 0.0);
    }

    #[test]
    fn tolerance_stops_early() {
        let g = graph(&[(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0)]);
        let config = PropagationConfig::new(50, 0.85).with_tolerance(1e-9);
        let outcome = SignedPageRank::new(config).propagate(&g, &SeedSet::new()).unwrap();
        // A symmetric cycle is already stationary.
        assert!(outcome.converged);
        assert_eq!(outcome.iterations_run, 1);
    }

    #[test]
    fn without_tolerance_runs_every_iteration() {
        let g = graph(&[(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0)]);
        let outcome = SignedPageRank::new(PropagationConfig::new(7, 0.85))
            .propagate(&g, &SeedSet::new())
            .unwrap();
        assert_eq!(outcome.iterations_run, 7);
        assert!(!outcome.converged);
        assert!(outcome.last_delta.is_some());
    }

    #[test]
    fn cancelled_token_stops_before_first_iteration() {
        let g = graph(&[(0, 1, 1.0)]);
        let token = CancellationToken::new();
        token.cancel();
        let err = SignedPageRank::default()
            .propagate_with_cancel(&g, &SeedSet::new(), &token)
            .unwrap_err();
        assert_eq!(err, SignRankError::Cancelled { completed: 0 });
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_sequential_exactly() {
        let g = graph(&[
            (0, 1, 1.0),
            (0, 2, -2.0),
            (1, 2, 3.0),
            (2, 0, 1.0),
            (2, 3, -1.0),
            (3, 1, 0.5),
            (3, 1, 0.5),
            (5, 0, 1.0),
        ]);
        let seeds = SeedSet::new().with_good([idx(0)]).with_bad([idx(3)]);
        let sequential = SignedPageRank::new(PropagationConfig::new(15, 0.85))
            .propagate(&g, &seeds)
            .unwrap();
        let parallel = SignedPageRank::new(PropagationConfig::new(15, 0.85).with_parallel(true))
            .propagate(&g, &seeds)
            .unwrap();
        assert_eq!(sequential.scores, parallel.scores);
    }
}
