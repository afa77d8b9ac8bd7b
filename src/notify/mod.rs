//! # Notification requests and the rendering seam.
//!
//! This module provides:
//! - [`NotificationRequest`] — the immutable unit of work in transit
//! - [`Notifier`] — the trait boundary in front of the OS toast backend
//! - [`ToastNotifier`] — the production implementation (`notify-rust`)
//! - [`DurationHint`] — on-screen duration passed to the backend

mod notifier;
mod request;
mod toast;

pub use notifier::{DurationHint, Notifier, NotifierRef};
pub use request::{NotificationRequest, NotifyBody};
pub use toast::ToastNotifier;
