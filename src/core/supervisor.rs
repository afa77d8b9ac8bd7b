//! # Supervisor: process lifecycle and graceful shutdown.
//!
//! The [`Supervisor`] owns the event bus and the runtime configuration. It
//! wires the pipeline, isolates the ingress side on its own task, runs the
//! dispatch loop in the controlling context, and tears everything down on a
//! termination signal.
//!
//! ## Startup order
//! ```text
//! log listener ─► bind listener ─► spawn IngressService ─► run DispatchLoop
//!                 (fail = exit ≠ 0)  (isolated task,          (this context)
//!                                     child token)
//! ```
//!
//! The queue's only producer handle moves into the ingress task. If that
//! task ever dies — panic included — the handle drops, the queue closes, the
//! dispatch loop drains what was accepted and exits, and the supervisor
//! tears down cleanly. Producer faults reach the consumer only as a closed
//! channel, never as shared-memory corruption.
//!
//! ## Shutdown path
//! ```text
//! signal ─► publish ShutdownRequested
//!        ─► cancel runtime token (ingress stops accepting; dispatch loop
//!           finishes its in-flight render, then exits)
//!        ─► wait up to Config::grace for both sides
//!              ├─ Ok      → publish AllStoppedWithin, exit 0
//!              └─ Timeout → abort ingress task, publish GraceExceeded,
//!                           still exit 0 (teardown faults are swallowed)
//! ```

use std::sync::Arc;

use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::{shutdown, DispatchLoop};
use crate::error::RuntimeError;
use crate::events::{Bus, Event, EventKind, LogWriter};
use crate::ingress::IngressService;
use crate::notify::NotifierRef;
use crate::queue;

/// Coordinates the ingress task, the dispatch loop, and graceful shutdown.
pub struct Supervisor {
    /// Global runtime configuration.
    pub cfg: Arc<Config>,
    /// Event bus shared with both sides of the queue.
    pub bus: Bus,
    /// Rendering backend handed to the dispatch loop.
    notifier: NotifierRef,
}

impl Supervisor {
    /// Creates a supervisor with the given config and rendering backend.
    pub fn new(cfg: Config, notifier: NotifierRef) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        Self {
            cfg: Arc::new(cfg),
            bus,
            notifier,
        }
    }

    /// Runs the bridge until a termination signal arrives (or the ingress
    /// task dies and the queue drains), then shuts down within
    /// [`Config::grace`].
    ///
    /// Returns an error only for unrecoverable startup failures; a signal
    /// is the normal way out and yields `Ok(())`.
    pub async fn run(self) -> Result<(), RuntimeError> {
        self.log_listener();

        let (producer, receiver) = queue::unbounded();
        let ingress =
            IngressService::bind(Arc::clone(&self.cfg), producer, self.bus.clone()).await?;
        // `producer` lives only inside the ingress task from here on: its
        // death closes the queue and the dispatch loop drains out.

        let token = CancellationToken::new();
        let mut ingress_task = tokio::spawn(ingress.run(token.child_token()));

        let dispatch = DispatchLoop::new(receiver, Arc::clone(&self.notifier), self.bus.clone());
        let dispatch_fut = dispatch.run(token.child_token());
        tokio::pin!(dispatch_fut);

        tokio::select! {
            _ = shutdown::wait_for_shutdown_signal() => {
                self.bus.publish(Event::now(EventKind::ShutdownRequested));
                token.cancel();

                let grace = self.cfg.grace;
                let both = async {
                    (&mut dispatch_fut).await;
                    let _ = (&mut ingress_task).await;
                };
                match time::timeout(grace, both).await {
                    Ok(()) => self.bus.publish(Event::now(EventKind::AllStoppedWithin)),
                    Err(_) => {
                        // Forceful fallback; any teardown fault is swallowed
                        // after this best-effort attempt.
                        ingress_task.abort();
                        self.bus.publish(Event::now(EventKind::GraceExceeded));
                    }
                }
            }
            _ = &mut dispatch_fut => {
                // Queue closed underneath us: the ingress task is gone.
                token.cancel();
                let _ = time::timeout(self.cfg.grace, &mut ingress_task).await;
                self.bus.publish(Event::now(EventKind::AllStoppedWithin));
            }
        }

        // Give the log listener a chance to flush the shutdown events.
        tokio::task::yield_now().await;
        Ok(())
    }

    /// Subscribes to the bus and writes every event through [`LogWriter`].
    fn log_listener(&self) {
        let mut rx = self.bus.subscribe();
        tokio::spawn(async move {
            let writer = LogWriter;
            loop {
                match rx.recv().await {
                    Ok(ev) => writer.write(&ev),
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }
}
