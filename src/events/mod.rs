//! # Runtime events and their delivery.
//!
//! This module provides the observability spine of the bridge:
//! - [`Event`] / [`EventKind`] — typed lifecycle events with sequence numbers
//! - [`Bus`] — broadcast channel the ingress and dispatch sides publish to
//! - [`LogWriter`] — stdout formatter the supervisor's listener drives
//!
//! Failures on either side of the queue are observed only through these
//! events; nothing crosses the producer/consumer boundary as an error value.

mod bus;
mod event;
mod log;

pub use bus::Bus;
pub use event::{Event, EventKind};
pub use log::LogWriter;
