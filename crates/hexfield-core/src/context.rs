//! Cooperative cancellation for long-running searches.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// A cooperative-cancellation token backed by an [`AtomicBool`], with an
/// optional deadline.
///
/// Clones share the cancellation flag, so a token handed to a search can be
/// cancelled from another thread. Searches poll [`is_done`](Self::is_done)
/// once per expanded node.
#[derive(Clone, Debug)]
pub struct Context {
    done: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl Context {
    /// Create a new, non-cancelled context without a deadline.
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
            deadline: None,
        }
    }

    /// Create a context that expires at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
            deadline: Some(deadline),
        }
    }

    /// Create a context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// The deadline, if any.
    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether cancellation has been requested or the deadline has passed.
    #[inline]
    pub fn is_done(&self) -> bool {
        if self.done.load(Ordering::Relaxed) {
            return true;
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
