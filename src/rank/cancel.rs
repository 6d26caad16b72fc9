//! Cooperative cancellation of a propagation run
//!
//! The engine polls the token before starting each iteration, never in the
//! middle of one, so a cancelled run never exposes a half-written rank vector.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag a caller flips to stop a running propagation.
///
/// Clones observe the same flag, so one clone can be handed to a signal
/// handler or another thread while the engine holds the other.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that propagation stop at the next iteration boundary.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
