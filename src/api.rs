//! End-to-end ranking of a relationship snapshot
//!
//! Ties the pieces together in the order they must run: load edges, register
//! seeds, freeze the graph, propagate once, summarize.

use crate::config::RankConfig;
use crate::error::SignRankError;
use crate::graph::{FrozenGraph, GraphStore};
use crate::ingest::{register_seeds, IdentifierRegistry, IngestError, SnapshotReader, SnapshotStats};
use crate::rank::{CancellationToken, Propagation, SignedPageRank};
use crate::report::RankReport;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during a ranking run
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Rank(#[from] SignRankError),
}

/// Everything a ranking run produced
#[derive(Debug)]
pub struct RankRun {
    pub registry: IdentifierRegistry,
    pub graph: FrozenGraph,
    pub stats: SnapshotStats,
    pub propagation: Propagation,
}

impl RankRun {
    /// Summarize the run with the configured report settings
    pub fn report(&self, config: &RankConfig) -> RankReport {
        RankReport::build(
            &self.propagation.scores,
            &self.registry,
            self.propagation.iterations_run,
            &config.report,
        )
    }

    /// Score of an external identifier, if it was part of the graph
    pub fn score_of(&self, id: &str) -> Option<f64> {
        self.registry
            .get(id)
            .and_then(|index| self.propagation.scores.get(index.get()).copied())
    }
}

/// Rank the snapshot at `path` under `config`
pub fn rank_snapshot(
    path: &Path,
    config: &RankConfig,
    cancel: Option<&CancellationToken>,
) -> Result<RankRun, RunError> {
    let mut registry = IdentifierRegistry::new();
    let mut store = GraphStore::new();

    let stats = SnapshotReader::new(config.snapshot.clone()).read_path(path, &mut registry, &mut store)?;
    let seeds = register_seeds(&mut registry, &mut store, &config.seeds.good, &config.seeds.bad)?;
    let graph = store.freeze();

    if seeds.is_empty() {
        tracing::warn!("no seeds configured; scores reflect graph structure only");
    }
    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        dangling = graph.nodes().filter(|node| node.is_dangling()).count(),
        good = seeds.good().len(),
        bad = seeds.bad().len(),
        "graph complete, ranking now"
    );

    let engine = SignedPageRank::new(config.propagation.clone());
    let propagation = match cancel {
        Some(token) => engine.propagate_with_cancel(&graph, &seeds, token)?,
        None => engine.propagate(&graph, &seeds)?,
    };

    Ok(RankRun {
        registry,
        graph,
        stats,
        propagation,
    })
}
