//! # Stdout log formatting for bridge events.
//!
//! [`LogWriter`] turns [`Event`]s into one human-readable line each. The
//! supervisor subscribes it to the bus; nothing else in the pipeline writes
//! to stdout directly.
//!
//! ## Output format
//! ```text
//! [ingress-started] addr=127.0.0.1:5000
//! [accepted] title="Build"
//! [parse-fallback] reason="expected value at line 1 column 1"
//! [displayed] title="Build"
//! [display-failed] title="Build" reason="backend gone"
//! [shutdown-requested]
//! [all-stopped-within-grace]
//! ```

use super::event::{Event, EventKind};

/// Formats events as single stdout lines.
#[derive(Debug, Default)]
pub struct LogWriter;

impl LogWriter {
    /// Writes one line for the event.
    pub fn write(&self, e: &Event) {
        match e.kind {
            EventKind::IngressStarted => {
                if let Some(addr) = e.addr {
                    println!("[ingress-started] addr={addr}");
                }
            }
            EventKind::IngressStopped => match &e.reason {
                Some(reason) => println!("[ingress-stopped] reason={reason:?}"),
                None => println!("[ingress-stopped]"),
            },
            EventKind::RequestAccepted => {
                println!("[accepted] title={:?}", e.title.as_deref().unwrap_or(""));
            }
            EventKind::ParseFallback => {
                println!(
                    "[parse-fallback] reason={:?}",
                    e.reason.as_deref().unwrap_or("")
                );
            }
            EventKind::EnqueueFailed => {
                println!(
                    "[enqueue-failed] reason={:?}",
                    e.reason.as_deref().unwrap_or("")
                );
            }
            EventKind::Displayed => {
                println!("[displayed] title={:?}", e.title.as_deref().unwrap_or(""));
            }
            EventKind::DisplayFailed => {
                println!(
                    "[display-failed] title={:?} reason={:?}",
                    e.title.as_deref().unwrap_or(""),
                    e.reason.as_deref().unwrap_or("")
                );
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
            EventKind::AllStoppedWithin => {
                println!("[all-stopped-within-grace]");
            }
            EventKind::GraceExceeded => {
                println!("[grace-exceeded] ingress task aborted");
            }
        }
    }
}
