//! # DispatchLoop: the single consumer.
//!
//! Serializes notification display. The loop alternates between two states:
//!
//! ```text
//! Waiting ──(dequeue yields item)──► Displaying ──(render returns/fails)──► Waiting
//!    │
//!    ├─(token cancelled)──► exit
//!    └─(queue closed & drained)──► exit
//! ```
//!
//! ## Rules
//! - Items are rendered **in strict enqueue order**, one at a time.
//! - The notifier is invoked **exactly once** per dequeued item.
//! - A render failure is published as [`EventKind::DisplayFailed`] and the
//!   item is considered consumed; the loop never halts on a bad item.
//! - Cancellation is observed only **between** items: whatever is mid-render
//!   when the token fires finishes before the loop exits.
//!
//! No backpressure is needed: the queue is unbounded and a slow render only
//! delays the next toast, never the producers.

use tokio_util::sync::CancellationToken;

use crate::events::{Bus, Event, EventKind};
use crate::notify::NotifierRef;
use crate::queue::QueueReceiver;

/// Single-consumer loop draining the notification queue into a
/// [`Notifier`](crate::Notifier).
pub struct DispatchLoop {
    queue: QueueReceiver,
    notifier: NotifierRef,
    bus: Bus,
}

impl DispatchLoop {
    /// Creates the loop over the consumer half of the queue.
    pub fn new(queue: QueueReceiver, notifier: NotifierRef, bus: Bus) -> Self {
        Self {
            queue,
            notifier,
            bus,
        }
    }

    /// Runs until the token is cancelled or the queue closes and drains.
    ///
    /// The wait on the queue is cancellable, so the supervisor can bound
    /// shutdown latency; the render call is not, so no item is abandoned
    /// mid-display.
    pub async fn run(mut self, token: CancellationToken) {
        loop {
            let request = tokio::select! {
                biased; // once cancelled, never pick up another item
                _ = token.cancelled() => break,
                item = self.queue.dequeue() => match item {
                    Some(request) => request,
                    None => break, // every producer handle is gone
                },
            };

            match self.notifier.notify(&request).await {
                Ok(()) => {
                    self.bus
                        .publish(Event::now(EventKind::Displayed).with_title(request.title));
                }
                Err(e) => {
                    self.bus.publish(
                        Event::now(EventKind::DisplayFailed)
                            .with_title(request.title)
                            .with_reason(e.to_string()),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::error::NotifyError;
    use crate::notify::{NotificationRequest, Notifier};
    use crate::queue;

    /// Records every rendered title; optionally fails or sleeps per call.
    struct RecordingNotifier {
        rendered: Mutex<Vec<String>>,
        calls: AtomicUsize,
        fail_on_call: Option<usize>,
        render_delay: Option<Duration>,
    }

    impl RecordingNotifier {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                rendered: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
                fail_on_call: None,
                render_delay: None,
            })
        }

        fn failing_on(call: usize) -> Arc<Self> {
            Arc::new(Self {
                rendered: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
                fail_on_call: Some(call),
                render_delay: None,
            })
        }

        fn slow(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                rendered: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
                fail_on_call: None,
                render_delay: Some(delay),
            })
        }

        fn titles(&self) -> Vec<String> {
            self.rendered.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        fn name(&self) -> &str {
            "recording"
        }

        async fn notify(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.render_delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_on_call == Some(call) {
                return Err(NotifyError::Backend {
                    error: "boom".to_string(),
                });
            }
            self.rendered.lock().unwrap().push(request.title.clone());
            Ok(())
        }
    }

    fn req(title: &str) -> NotificationRequest {
        NotificationRequest {
            title: title.to_string(),
            message: "m".to_string(),
            app_id: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn test_renders_in_fifo_order_exactly_once() {
        let (tx, rx) = queue::unbounded();
        let notifier = RecordingNotifier::new();
        let looped = DispatchLoop::new(rx, notifier.clone(), Bus::new(16));

        for title in ["a", "b", "c"] {
            tx.enqueue(req(title)).unwrap();
        }
        drop(tx); // close so the loop drains and exits

        looped.run(CancellationToken::new()).await;
        assert_eq!(notifier.titles(), vec!["a", "b", "c"]);
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_loop_survives_a_failing_render() {
        let (tx, rx) = queue::unbounded();
        let notifier = RecordingNotifier::failing_on(1); // second item fails
        let bus = Bus::new(16);
        let mut events = bus.subscribe();
        let looped = DispatchLoop::new(rx, notifier.clone(), bus);

        for title in ["a", "b", "c", "d"] {
            tx.enqueue(req(title)).unwrap();
        }
        drop(tx);

        looped.run(CancellationToken::new()).await;
        assert_eq!(notifier.titles(), vec!["a", "c", "d"]);

        let mut failed = 0;
        while let Ok(ev) = events.try_recv() {
            if ev.kind == EventKind::DisplayFailed {
                assert_eq!(ev.title.as_deref(), Some("b"));
                failed += 1;
            }
        }
        assert_eq!(failed, 1);
    }

    #[tokio::test]
    async fn test_cancellation_unblocks_an_idle_wait() {
        let (_tx, rx) = queue::unbounded();
        let notifier = RecordingNotifier::new();
        let token = CancellationToken::new();
        let handle = tokio::spawn(DispatchLoop::new(rx, notifier, Bus::new(16)).run(token.clone()));

        token.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("loop did not exit after cancel")
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_render_completes_after_cancel() {
        let (tx, rx) = queue::unbounded();
        let notifier = RecordingNotifier::slow(Duration::from_millis(500));
        let token = CancellationToken::new();
        let handle =
            tokio::spawn(DispatchLoop::new(rx, notifier.clone(), Bus::new(16)).run(token.clone()));

        tx.enqueue(req("mid-render")).unwrap();
        // Let the loop pick the item up, then cancel while it renders.
        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
        handle.await.unwrap();

        assert_eq!(notifier.titles(), vec!["mid-render"]);
    }

    #[tokio::test]
    async fn test_no_items_consumed_after_cancel() {
        let (tx, rx) = queue::unbounded();
        let notifier = RecordingNotifier::new();
        let token = CancellationToken::new();
        token.cancel();

        tx.enqueue(req("late")).unwrap();
        DispatchLoop::new(rx, notifier.clone(), Bus::new(16))
            .run(token)
            .await;

        assert!(notifier.titles().is_empty());
    }
}
