//! # The rendering seam.
//!
//! [`Notifier`] is the trait boundary between the dispatch loop and whatever
//! actually puts pixels on screen. Production uses
//! [`ToastNotifier`](crate::ToastNotifier); tests substitute a recording
//! implementation. The common handle type is [`NotifierRef`], an
//! `Arc<dyn Notifier>` suitable for sharing across the runtime.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::NotifyError;
use crate::notify::NotificationRequest;

/// Shared reference to a notifier.
pub type NotifierRef = Arc<dyn Notifier>;

/// # Renders one notification at a time.
///
/// `notify` is invoked exactly once per dequeued request, sequentially, and
/// may take non-trivial wall-clock time; that only delays the next toast,
/// never the HTTP response path. A returned error is logged by the dispatch
/// loop and must not be treated as fatal by implementations.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use toastd::{NotificationRequest, Notifier, NotifyError};
///
/// struct Stdout;
///
/// #[async_trait]
/// impl Notifier for Stdout {
///     fn name(&self) -> &str { "stdout" }
///
///     async fn notify(&self, req: &NotificationRequest) -> Result<(), NotifyError> {
///         println!("{}: {}", req.title, req.message);
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Returns a stable, human-readable backend name.
    fn name(&self) -> &str;

    /// Displays one notification, returning when the backend has accepted
    /// or rejected it.
    async fn notify(&self, request: &NotificationRequest) -> Result<(), NotifyError>;
}

/// How long a rendered toast should stay on screen.
///
/// Mirrors the two duration classes desktop notification centers expose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DurationHint {
    /// Standard transient toast (about 7 seconds).
    Short,
    /// Sticky toast for things worth walking back to (about 25 seconds).
    Long,
}

impl DurationHint {
    /// Returns the hint as a backend timeout in milliseconds.
    pub fn as_millis(self) -> u32 {
        match self {
            DurationHint::Short => 7_000,
            DurationHint::Long => 25_000,
        }
    }
}
