//! Ingestion: identifier mapping and snapshot loading
//!
//! Everything here turns external data into graph-store calls. The store
//! and the engine never see string identifiers.

mod registry;
mod snapshot;

pub use registry::IdentifierRegistry;
pub use snapshot::{SnapshotLayout, SnapshotReader, SnapshotStats};

use crate::error::SignRankError;
use crate::graph::GraphStore;
use crate::rank::SeedSet;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading input data
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Graph(#[from] SignRankError),
}

/// Result type for ingestion operations
pub type IngestResult<T> = Result<T, IngestError>;

/// Register seed identifiers and build the matching [`SeedSet`]
///
/// A seed that never appeared in the snapshot still gets an index and a node,
/// so it takes part in ranking as an isolated node.
pub fn register_seeds<G, B>(
    registry: &mut IdentifierRegistry,
    store: &mut GraphStore,
    good: G,
    bad: B,
) -> IngestResult<SeedSet>
where
    G: IntoIterator,
    G::Item: AsRef<str>,
    B: IntoIterator,
    B::Item: AsRef<str>,
{
    let mut seeds = SeedSet::new();
    for id in good {
        let index = intern_seed(registry, store, id.as_ref())?;
        seeds.add_good(index);
    }
    for id in bad {
        let index = intern_seed(registry, store, id.as_ref())?;
        seeds.add_bad(index);
    }
    Ok(seeds)
}

fn intern_seed(
    registry: &mut IdentifierRegistry,
    store: &mut GraphStore,
    id: &str,
) -> IngestResult<crate::graph::NodeIndex> {
    if registry.get(id).is_none() {
        tracing::warn!(id, "seed not present in snapshot; adding isolated node");
    }
    let index = registry.intern(id);
    store.ensure_node(index)?;
    Ok(index)
}
