//! Deadlines and cancellation for path searches.
//!
//! `allpaths` is exponential in the worst case on densely connected graphs.
//! A [`Deadline`] lets the caller bound that: the search checks it before
//! every step deeper into the graph and fails with
//! [`Error::Aborted`](crate::Error::Aborted) once it has expired or been
//! cancelled. No partial result is returned on abort.

use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Why a traversal stopped before completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The wall-clock limit elapsed.
    TimedOut {
        /// The limit that was exceeded.
        limit: Duration,
    },
    /// A [`CancelHandle`] was triggered.
    Cancelled,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimedOut { limit } => write!(f, "timed out after {limit:?}"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Shared flag for cancelling running queries from another thread.
///
/// Cloning the handle shares the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Create a handle in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every query observing this handle.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Latency bound for a single query.
///
/// The default deadline never expires.
#[derive(Debug, Clone, Default)]
pub struct Deadline {
    expires: Option<(Instant, Duration)>,
    cancel: Option<CancelHandle>,
}

impl Deadline {
    /// A deadline that never expires.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// A deadline `limit` from now.
    #[must_use]
    pub fn after(limit: Duration) -> Self {
        Self {
            expires: Some((Instant::now() + limit, limit)),
            cancel: None,
        }
    }

    /// Also abort when `handle` is cancelled.
    #[must_use]
    pub fn with_cancel(mut self, handle: CancelHandle) -> Self {
        self.cancel = Some(handle);
        self
    }

    /// Fail with [`Error::Aborted`] if the deadline has passed or the query
    /// was cancelled.
    ///
    /// # Errors
    ///
    /// Returns `Error::Aborted` with the reason for stopping.
    pub fn check(&self) -> Result<()> {
        if self.cancel.as_ref().is_some_and(CancelHandle::is_cancelled) {
            return Err(Error::Aborted {
                reason: AbortReason::Cancelled,
            });
        }

        if let Some((expires_at, limit)) = self.expires {
            if Instant::now() >= expires_at {
                return Err(Error::Aborted {
                    reason: AbortReason::TimedOut { limit },
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_deadline_never_expires() {
        assert!(Deadline::none().check().is_ok());
    }

    #[test]
    fn test_zero_limit_expires_immediately() {
        let deadline = Deadline::after(Duration::ZERO);

        assert_eq!(
            deadline.check(),
            Err(Error::Aborted {
                reason: AbortReason::TimedOut {
                    limit: Duration::ZERO
                }
            })
        );
    }

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let handle = CancelHandle::new();
        let deadline = Deadline::after(Duration::from_secs(3600)).with_cancel(handle.clone());
        assert!(deadline.check().is_ok());

        handle.cancel();

        assert_eq!(
            deadline.check(),
            Err(Error::Aborted {
                reason: AbortReason::Cancelled
            })
        );
    }
}
