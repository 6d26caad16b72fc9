//! Error types shared by the graph store and the propagation engine

use thiserror::Error;

/// Errors that can occur while building a graph or propagating scores
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignRankError {
    /// Caller supplied an input outside the accepted domain
    #[error("Validation error: {0}")]
    Validation(String),

    /// An internal invariant did not hold (never expected at runtime)
    #[error("Invariant violated: {0}")]
    Logic(String),

    /// Storage could not be allocated
    #[error("Resource exhausted: {0}")]
    Resource(String),

    /// Propagation was cancelled at an iteration boundary
    #[error("Propagation cancelled after {completed} iteration(s)")]
    Cancelled { completed: usize },
}

/// Result type for graph and propagation operations
pub type SignRankResult<T> = Result<T, SignRankError>;

/// Reserve room for `additional` more elements, mapping allocation failure
/// to [`SignRankError::Resource`].
pub(crate) fn try_reserve<T>(vec: &mut Vec<T>, additional: usize, what: &str) -> SignRankResult<()> {
    vec.try_reserve(additional).map_err(|e| {
        SignRankError::Resource(format!(
            "cannot grow {} by {} entries: {}",
            what, additional, e
        ))
    })
}

/// Allocate a score vector of `len` entries filled with `value`.
pub(crate) fn alloc_scores(len: usize, value: f64) -> SignRankResult<Vec<f64>> {
    let mut scores = Vec::new();
    try_reserve(&mut scores, len, "score vector")?;
    scores.resize(len, value);
    Ok(scores)
}
