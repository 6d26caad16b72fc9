//! signrank: Signed Trust Propagation
//!
//! Computes a trust/distrust score for every participant of a social graph
//! built from follow and block relationships, using a signed variant of
//! PageRank.
//!
//! # Core Concepts
//!
//! - **Graph store**: dense, index-addressed nodes with signed out-edges
//!   (positive = follow, negative = block)
//! - **Seeds**: known-good nodes start at `+1`, known-bad nodes at `-1`
//! - **Propagation**: fixed-count power iteration; each node's positive and
//!   negative out-weights are normalized separately
//!
//! # Example
//!
//! ```
//! use signrank::{propagate, GraphStore, NodeIndex, SeedSet};
//!
//! let mut store = GraphStore::new();
//! store.add_edge(NodeIndex::new(0), NodeIndex::new(1), 1.0).unwrap();
//! store.add_edge(NodeIndex::new(1), NodeIndex::new(2), -1.0).unwrap();
//! let graph = store.freeze();
//!
//! let seeds = SeedSet::new().with_good([NodeIndex::new(0)]);
//! let scores = propagate(&graph, &seeds, 20, 0.85).unwrap();
//! assert_eq!(scores.len(), 3);
//! assert!(scores[2] < 0.0);
//! ```

pub mod api;
pub mod config;
mod error;
mod graph;
pub mod ingest;
pub mod rank;
pub mod report;

pub use api::{rank_snapshot, RankRun, RunError};
pub use config::{ConfigError, RankConfig, SeedConfig};
pub use error::{SignRankError, SignRankResult};
pub use graph::{Edge, FrozenGraph, GraphStore, Node, NodeIndex, Sign, Slot};
pub use ingest::{IdentifierRegistry, IngestError, SnapshotLayout, SnapshotReader, SnapshotStats};
pub use rank::{propagate, CancellationToken, Propagation, PropagationConfig, SeedSet, SignedPageRank};
pub use report::{Histogram, RankReport, RankedNode, ReportConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
