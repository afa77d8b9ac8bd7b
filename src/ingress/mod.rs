//! # HTTP ingress: turns external requests into queued work items.
//!
//! One route, `POST /notify`, permissive CORS, bound to the configured local
//! address. The handler never blocks on rendering; a `200` only means the
//! item reached the queue.

mod service;

pub use service::IngressService;
