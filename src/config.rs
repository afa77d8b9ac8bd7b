//! # Runtime configuration.
//!
//! Provides [`Config`], the centralized settings for the bridge: where the
//! ingress listener binds, which defaults are substituted into incomplete
//! requests, how the toast backend is asked to render, and how long shutdown
//! may take.
//!
//! Every value that could pass for a constant (default title, default
//! message, app id, host, port) lives here explicitly and is injected at
//! startup rather than read from hidden module globals.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::notify::DurationHint;

/// Global configuration for the notification bridge.
///
/// ## Field semantics
/// - `host`/`port`: bind address of the ingress listener
/// - `default_title`/`default_message`: substituted when a request body omits
///   the field (or carries JSON `null`); an explicit empty string is kept
/// - `app_id`: identifier shown by the OS notification center, also the
///   fallback when the body has no `app_id`
/// - `duration`: how long a toast stays on screen ([`DurationHint`])
/// - `play_sound`: whether the backend is asked to play the default sound
/// - `grace`: maximum wait for the pipeline to stop after a termination
///   signal before the ingress task is aborted
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped)
#[derive(Clone, Debug)]
pub struct Config {
    /// Address the ingress listener binds on.
    pub host: IpAddr,
    /// Port the ingress listener binds on.
    pub port: u16,
    /// Title used when a request carries none.
    pub default_title: String,
    /// Message used when a request carries none.
    pub default_message: String,
    /// Application identifier passed to the notification backend.
    pub app_id: String,
    /// On-screen duration hint for rendered toasts.
    pub duration: DurationHint,
    /// Ask the backend to play the default notification sound.
    pub play_sound: bool,
    /// Maximum time to wait for graceful shutdown before force-terminating
    /// the ingress task.
    pub grace: Duration,
    /// Capacity of the event bus broadcast ring buffer.
    pub bus_capacity: usize,
}

impl Config {
    /// Returns the socket address the ingress listener binds on.
    #[inline]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    ///
    /// The [`Bus`](crate::Bus) should use this value to avoid constructing
    /// an invalid channel.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `host = 127.0.0.1`, `port = 5000` (local trust boundary)
    /// - `default_title = "Notification"`, `default_message = "New message"`
    /// - `app_id = "toastd"`
    /// - `duration = Short`, `play_sound = true`
    /// - `grace = 2s`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5000,
            default_title: "Notification".to_string(),
            default_message: "New message".to_string(),
            app_id: "toastd".to_string(),
            duration: DurationHint::Short,
            play_sound: true,
            grace: Duration::from_secs(2),
            bus_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_addr_is_local() {
        let cfg = Config::default();
        assert_eq!(cfg.bind_addr(), "127.0.0.1:5000".parse().unwrap());
    }

    #[test]
    fn test_bus_capacity_clamped_to_one() {
        let mut cfg = Config::default();
        cfg.bus_capacity = 0;
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
