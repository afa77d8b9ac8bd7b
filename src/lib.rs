//! # toastd
//!
//! **toastd** is a local bridge between HTTP producers and the desktop
//! notification center. A web page (or any local client) POSTs a title and a
//! message to `/notify`; a single consumer loop dequeues each request and
//! renders it as an OS toast. Request handling never waits on rendering:
//! the HTTP response only confirms that the item reached the queue.
//!
//! ## Architecture
//! ```text
//!   client ──► IngressService ──► NotificationQueue ──► DispatchLoop ──► Notifier
//!              (axum, POST        (unbounded mpsc,      (single           (OS toast
//!               /notify)           FIFO)                 consumer)         backend)
//!
//!   Supervisor
//!   ├─ binds the listener, spawns IngressService on an isolated task
//!   ├─ runs DispatchLoop in the controlling context
//!   ├─ waits for SIGINT/SIGTERM, cancels via a CancellationToken tree
//!   └─ waits out a bounded grace period, then aborts the ingress task
//!
//!   Bus (broadcast) ──► log listener ──► LogWriter (stdout)
//! ```
//!
//! The two sides share exactly one channel. A fault on the ingress side is
//! contained by its task boundary and cannot corrupt the consumer's state;
//! the consumer observes it only as the queue closing.
//!
//! ## Guarantees
//! - Enqueue is non-blocking and at-most-once per accepted request.
//! - Notifications are displayed in strict enqueue order, one at a time.
//! - A failing render is logged and skipped; the loop never stops on it.
//! - Malformed request bodies are tolerated: missing fields fall back to
//!   configured defaults, never to a client error.
//! - On shutdown an in-flight render completes before the process exits.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use toastd::{Config, Supervisor, ToastNotifier};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = Config::default(); // 127.0.0.1:5000
//!     let notifier = Arc::new(ToastNotifier::from_config(&cfg));
//!     Supervisor::new(cfg, notifier).run().await?;
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod ingress;
mod notify;
mod queue;

// ---- Public re-exports ----

pub use config::Config;
pub use self::core::{DispatchLoop, Supervisor};
pub use error::{EnqueueError, NotifyError, RuntimeError};
pub use events::{Bus, Event, EventKind, LogWriter};
pub use ingress::IngressService;
pub use notify::{DurationHint, NotificationRequest, Notifier, NotifierRef, ToastNotifier};
pub use queue::{NotificationQueue, QueueReceiver};
