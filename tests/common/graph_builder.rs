//! Graph building utilities for integration tests

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use signrank::{FrozenGraph, GraphStore, NodeIndex};

pub fn idx(i: usize) -> NodeIndex {
    NodeIndex::new(i)
}

/// Build a frozen graph from `(src, dest, weight)` triples
pub fn build_graph(edges: &[(usize, usize, f64)]) -> FrozenGraph {
    let mut store = GraphStore::new();
    for &(src, dest, weight) in edges {
        store.add_edge(idx(src), idx(dest), weight).unwrap();
    }
    store.freeze()
}

/// Configuration for a random signed graph
#[derive(Debug, Clone)]
pub struct RandomGraphConfig {
    pub nodes: usize,
    pub edges: usize,
    /// Probability that an edge is a block
    pub block_ratio: f64,
    pub seed: u64,
}

impl Default for RandomGraphConfig {
    fn default() -> Self {
        Self {
            nodes: 200,
            edges: 1_500,
            block_ratio: 0.2,
            seed: 7,
        }
    }
}

/// Random signed graph with unit weights, reproducible from `config.seed`
pub fn random_graph(config: &RandomGraphConfig) -> FrozenGraph {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut store = GraphStore::new();
    for i in 0..config.nodes {
        store.ensure_node(idx(i)).unwrap();
    }
    for _ in 0..config.edges {
        let src = rng.gen_range(0..config.nodes);
        let dest = rng.gen_range(0..config.nodes);
        let weight = if rng.gen_bool(config.block_ratio) { -1.0 } else { 1.0 };
        store.add_edge(idx(src), idx(dest), weight).unwrap();
    }
    store.freeze()
}
