//! Signed propagation engine
//!
//! A signed variant of PageRank: follow edges pass trust forward, block
//! edges pass it forward negated. Each node's positive and negative
//! out-weights are normalized separately, and the run lasts a fixed number
//! of iterations unless a tolerance is configured.

mod cancel;
mod config;
mod engine;
mod normalize;
#[cfg(feature = "parallel")]
mod parallel;

pub use cancel::CancellationToken;
pub use config::{PropagationConfig, SeedSet};
pub use engine::{propagate, Propagation, SignedPageRank};
pub use normalize::{sign_totals, SignTotals};
