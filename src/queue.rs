//! # The notification queue: the only state shared between the two sides.
//!
//! A process-safe, unbounded FIFO channel of [`NotificationRequest`]s built
//! on [`tokio::sync::mpsc`]. The ingress side holds cloned
//! [`NotificationQueue`] producer handles; the dispatch loop owns the single
//! [`QueueReceiver`].
//!
//! ## Contract
//! - `enqueue` never blocks and fails only once the consumer half is gone.
//! - `dequeue` waits for the next item and yields items in strict FIFO order
//!   across all producer clones; no item is lost or duplicated between a
//!   successful enqueue and its dequeue.
//! - When every producer handle has been dropped, `dequeue` drains what is
//!   left and then returns `None` — the close sentinel that lets the
//!   consumer stop instead of waiting forever.

use tokio::sync::mpsc;

use crate::error::EnqueueError;
use crate::notify::NotificationRequest;

/// Creates a connected queue pair: clonable producer handle and the single
/// consumer half.
pub fn unbounded() -> (NotificationQueue, QueueReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (NotificationQueue { tx }, QueueReceiver { rx })
}

/// Producer handle onto the notification queue.
///
/// Cheap to clone; each HTTP worker may hold its own.
#[derive(Clone, Debug)]
pub struct NotificationQueue {
    tx: mpsc::UnboundedSender<NotificationRequest>,
}

impl NotificationQueue {
    /// Enqueues one request without blocking.
    ///
    /// Ownership of the request moves into the queue; there is no partial
    /// enqueue. Fails only with [`EnqueueError`] when the consumer half was
    /// dropped.
    pub fn enqueue(&self, request: NotificationRequest) -> Result<(), EnqueueError> {
        self.tx.send(request).map_err(|_| EnqueueError)
    }

    /// Returns `true` once the consumer half has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer half of the notification queue.
///
/// Exactly one exists per queue; FIFO order is a consequence of that.
#[derive(Debug)]
pub struct QueueReceiver {
    rx: mpsc::UnboundedReceiver<NotificationRequest>,
}

impl QueueReceiver {
    /// Waits for the next request.
    ///
    /// Returns `None` once all producer handles are dropped and the queue is
    /// drained.
    pub async fn dequeue(&mut self) -> Option<NotificationRequest> {
        self.rx.recv().await
    }
}
