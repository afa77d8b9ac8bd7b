//! Runtime core: the consumer loop and process lifecycle.
//!
//! Internal modules:
//! - [`dispatch`]: single-consumer loop that renders queued notifications;
//! - [`supervisor`]: startup order, signal handling, graceful shutdown;
//! - [`shutdown`]: cross-platform termination signal handling.

mod dispatch;
mod shutdown;
mod supervisor;

pub use dispatch::DispatchLoop;
pub use supervisor::Supervisor;
