//! # Lifecycle events emitted by the ingress and dispatch sides.
//!
//! [`EventKind`] classifies events across the pipeline:
//! - **Ingress events**: listener up/down, requests accepted, parse fallbacks
//! - **Dispatch events**: toasts displayed or failed
//! - **Shutdown events**: signal observed, grace outcome
//!
//! The [`Event`] struct carries the metadata a log line needs: a timestamp,
//! a monotonic sequence number, and optional title/reason/address fields
//! depending on the kind.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of bridge events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Ingress events ===
    /// The ingress listener is bound and serving.
    ///
    /// Sets: `addr`.
    IngressStarted,

    /// The ingress listener stopped serving (graceful or faulted).
    ///
    /// Sets: `reason` (only when the server returned an error).
    IngressStopped,

    /// A request was validated and enqueued; the caller got `200`.
    ///
    /// Sets: `title`.
    RequestAccepted,

    /// A request body could not be parsed; defaults were substituted.
    ///
    /// Sets: `reason` (the parse error). The request still succeeds.
    ParseFallback,

    /// Enqueue failed (queue closed); the caller got `500`.
    ///
    /// Sets: `reason`.
    EnqueueFailed,

    // === Dispatch events ===
    /// A toast was handed to the OS backend and rendered.
    ///
    /// Sets: `title`.
    Displayed,

    /// The OS backend failed to render; the item is dropped, the loop
    /// continues.
    ///
    /// Sets: `title`, `reason`.
    DisplayFailed,

    // === Shutdown events ===
    /// A termination signal was observed; teardown begins.
    ShutdownRequested,

    /// Dispatch and ingress both stopped within the grace period.
    AllStoppedWithin,

    /// The grace period elapsed; the ingress task was aborted.
    GraceExceeded,
}

/// Bridge event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Title of the notification involved, if applicable.
    pub title: Option<Arc<str>>,
    /// Human-readable reason (parse errors, backend errors, etc.).
    pub reason: Option<Arc<str>>,
    /// Listener address, for ingress lifecycle events.
    pub addr: Option<SocketAddr>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// the next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            title: None,
            reason: None,
            addr: None,
        }
    }

    /// Attaches the notification title.
    #[inline]
    pub fn with_title(mut self, title: impl Into<Arc<str>>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches the listener address.
    #[inline]
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = Some(addr);
        self
    }
}
