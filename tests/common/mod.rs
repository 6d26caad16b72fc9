//! Common test utilities for signrank integration tests

#![allow(dead_code, unused_imports)]

pub mod graph_builder;
pub mod snapshot;

pub use graph_builder::{build_graph, idx, random_graph, RandomGraphConfig};
pub use snapshot::{write_snapshot, SnapshotRow};

/// Absolute tolerance for float comparisons that involve reordered sums
pub const EPS: f64 = 1e-12;

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {}, got {} (diff {})",
        expected,
        actual,
        (actual - expected).abs()
    );
}
