//! Cooperative cancellation for experiment runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation signal shared between a run and its caller.
///
/// Cloning yields another handle to the same underlying flag, so the caller
/// keeps one handle and hands a clone to whatever observes the signal. The
/// runner polls the token at condition boundaries only; see
/// [`Runner::run`](crate::experiment::Runner::run) for the granularity
/// contract.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation. Idempotent; there is no way to un-cancel.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns true once [`cancel`](Self::cancel) has been called on any
    /// handle to this token.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
