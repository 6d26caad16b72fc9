//! Relationship snapshot reader
//!
//! A snapshot is a comma-separated table with one relationship per row.
//! Only four columns matter: source id, destination id, and the block and
//! follow flags. A block becomes a `-1` edge, a follow a `+1` edge; rows
//! with neither flag are skipped.

use super::registry::IdentifierRegistry;
use super::{IngestError, IngestResult};
use crate::graph::GraphStore;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column positions and flag encoding of a snapshot file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotLayout {
    pub source_column: usize,
    pub target_column: usize,
    pub block_column: usize,
    pub follow_column: usize,
    /// Field value that marks a flag as set
    pub true_marker: String,
    /// Skip the first row
    pub has_header: bool,
}

impl Default for SnapshotLayout {
    fn default() -> Self {
        Self {
            source_column: 0,
            target_column: 1,
            block_column: 6,
            follow_column: 7,
            true_marker: "t".to_string(),
            has_header: true,
        }
    }
}

impl SnapshotLayout {
    fn widest_column(&self) -> usize {
        self.source_column
            .max(self.target_column)
            .max(self.block_column)
            .max(self.follow_column)
    }
}

/// Counters collected while reading a snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotStats {
    /// Data records read (header and blank lines excluded)
    pub rows: usize,
    pub follows: usize,
    pub blocks: usize,
    /// Rows carrying neither flag
    pub skipped: usize,
}

impl SnapshotStats {
    pub fn edges(&self) -> usize {
        self.follows + self.blocks
    }
}

/// Streams snapshot rows into a [`GraphStore`]
#[derive(Debug, Clone, Default)]
pub struct SnapshotReader {
    layout: SnapshotLayout,
}

impl SnapshotReader {
    pub fn new(layout: SnapshotLayout) -> Self {
        Self { layout }
    }

    /// Read the snapshot at `path`
    pub fn read_path(
        &self,
        path: &Path,
        registry: &mut IdentifierRegistry,
        store: &mut GraphStore,
    ) -> IngestResult<SnapshotStats> {
        let file = File::open(path).map_err(|source| IngestError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "reading snapshot");
        self.read(file, registry, store)
    }

    /// Read snapshot records from any byte source
    ///
    /// Quoted fields may span lines. Fields are compared as bytes; identifiers
    /// that are not valid UTF-8 are decoded lossily.
    pub fn read<R: Read>(
        &self,
        reader: R,
        registry: &mut IdentifierRegistry,
        store: &mut GraphStore,
    ) -> IngestResult<SnapshotStats> {
        let mut rows = csv::ReaderBuilder::new()
            .has_headers(self.layout.has_header)
            .flexible(true)
            .from_reader(reader);
        let mut record = csv::ByteRecord::new();
        let mut stats = SnapshotStats::default();
        let widest = self.layout.widest_column();
        let marker = self.layout.true_marker.as_bytes();

        while rows.read_byte_record(&mut record).map_err(csv_error)? {
            let line = record_line(&record);
            if record.len() <= widest {
                return Err(IngestError::Parse {
                    line,
                    message: format!(
                        "expected at least {} columns, found {}",
                        widest + 1,
                        record.len()
                    ),
                });
            }
            stats.rows += 1;

            let block = &record[self.layout.block_column] == marker;
            let follow = &record[self.layout.follow_column] == marker;
            let weight = if block {
                stats.blocks += 1;
                -1.0
            } else if follow {
                stats.follows += 1;
                1.0
            } else {
                stats.skipped += 1;
                continue;
            };

            let src = registry.intern(&identifier(&record[self.layout.source_column], line));
            let dest = registry.intern(&identifier(&record[self.layout.target_column], line));
            store.add_edge(src, dest, weight)?;
        }

        tracing::info!(
            rows = stats.rows,
            follows = stats.follows,
            blocks = stats.blocks,
            skipped = stats.skipped,
            nodes = registry.len(),
            "snapshot loaded"
        );
        Ok(stats)
    }
}

/// Line on which `record` starts (1-based)
fn record_line(record: &csv::ByteRecord) -> usize {
    record.position().map_or(0, |pos| pos.line() as usize)
}

fn identifier(field: &[u8], line: usize) -> Cow<'_, str> {
    let id = String::from_utf8_lossy(field);
    if matches!(id, Cow::Owned(_)) {
        tracing::warn!(line, id = %id, "identifier is not valid UTF-8; decoded lossily");
    }
    id
}

fn csv_error(err: csv::Error) -> IngestError {
    let line = err.position().map_or(0, |pos| pos.line() as usize);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => IngestError::Io(source),
        _ => IngestError::Parse { line, message },
    }
}
