//! Error types used by the bridge runtime and the notification pipeline.
//!
//! Three error types, one per boundary:
//!
//! - [`RuntimeError`] — startup failures of the runtime itself.
//! - [`EnqueueError`] — the producer side lost the queue (consumer gone).
//! - [`NotifyError`] — the OS notification backend failed to render.
//!
//! Nothing from the consumer side ever propagates back to the producer side:
//! render failures stay inside the dispatch loop and are observed only
//! through events/logs.

use std::net::SocketAddr;

use thiserror::Error;

/// # Errors produced by the bridge runtime.
///
/// These are unrecoverable startup failures; the process exits non-zero on
/// any of them. Errors after startup are handled locally and never reach
/// this type.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The ingress listener could not bind its address (e.g. port in use).
    #[error("failed to bind ingress listener on {addr}: {source}")]
    Bind {
        /// The address that could not be bound.
        addr: SocketAddr,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::Bind { .. } => "runtime_bind_failed",
        }
    }
}

/// The notification queue is closed: the consumer half was dropped.
///
/// This is the only way `enqueue` can fail (the queue is unbounded).
/// The ingress handler surfaces it to the HTTP caller as a server error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("notification queue is closed")]
pub struct EnqueueError;

/// # Errors produced by the notification backend.
///
/// These never terminate the dispatch loop; the failed item is considered
/// consumed (no retry) and the loop moves on.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The OS backend refused or failed to display the toast.
    #[error("notification backend failed: {error}")]
    Backend {
        /// The underlying backend error message.
        error: String,
    },
    /// The blocking render task was cancelled or panicked before finishing.
    #[error("notification render task did not complete")]
    Interrupted,
}

impl NotifyError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            NotifyError::Backend { .. } => "notify_backend_failed",
            NotifyError::Interrupted => "notify_interrupted",
        }
    }
}
