//! # OS toast backend.
//!
//! [`ToastNotifier`] renders requests through the `notify-rust` crate. The
//! backend call is synchronous at the OS boundary, so it runs under
//! [`tokio::task::spawn_blocking`]; the dispatch loop stays a plain async
//! consumer either way.
//!
//! Backend failures (no notification daemon, display gone, etc.) come back
//! as [`NotifyError::Backend`] and never as a panic.

use async_trait::async_trait;

use crate::config::Config;
use crate::error::NotifyError;
use crate::notify::{DurationHint, NotificationRequest, Notifier};

/// Production notifier backed by the desktop notification center.
#[derive(Clone, Debug)]
pub struct ToastNotifier {
    duration: DurationHint,
    play_sound: bool,
}

impl ToastNotifier {
    /// Creates a notifier with explicit rendering options.
    pub fn new(duration: DurationHint, play_sound: bool) -> Self {
        Self {
            duration,
            play_sound,
        }
    }

    /// Creates a notifier from the rendering options in `cfg`.
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.duration, cfg.play_sound)
    }
}

#[async_trait]
impl Notifier for ToastNotifier {
    fn name(&self) -> &str {
        "toast"
    }

    async fn notify(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        let request = request.clone();
        let duration = self.duration;
        let play_sound = self.play_sound;

        let shown = tokio::task::spawn_blocking(move || {
            let mut toast = notify_rust::Notification::new();
            toast
                .appname(&request.app_id)
                .summary(&request.title)
                .body(&request.message)
                .timeout(notify_rust::Timeout::Milliseconds(duration.as_millis()));
            if play_sound {
                toast.sound_name("message-new-instant");
            }
            toast.show().map(|_| ())
        })
        .await;

        match shown {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(NotifyError::Backend {
                error: e.to_string(),
            }),
            Err(_join) => Err(NotifyError::Interrupted),
        }
    }
}
