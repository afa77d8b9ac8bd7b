//! toastd binary: parse the command line, build the pipeline, run it until
//! a termination signal.
//!
//! Exit codes: `0` after a clean signal-driven shutdown, `1` on an
//! unrecoverable startup failure (typically the port is already bound).

use std::net::IpAddr;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use toastd::{Config, DurationHint, Supervisor, ToastNotifier};

/// Local HTTP-to-desktop-notification bridge.
#[derive(Parser, Debug)]
#[command(name = "toastd", version, about)]
struct Cli {
    /// Address the ingress listener binds on.
    #[arg(long, env = "TOASTD_HOST", default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port the ingress listener binds on.
    #[arg(long, env = "TOASTD_PORT", default_value_t = 5000)]
    port: u16,

    /// Application identifier shown by the notification center.
    #[arg(long, env = "TOASTD_APP_ID")]
    app_id: Option<String>,

    /// Keep toasts on screen longer.
    #[arg(long)]
    long_duration: bool,

    /// Do not play a sound when a toast is displayed.
    #[arg(long)]
    silent: bool,

    /// Seconds to wait for the pipeline to stop after a termination signal.
    #[arg(long, default_value_t = 2)]
    grace_secs: u64,
}

impl Cli {
    fn into_config(self) -> Config {
        let mut cfg = Config::default();
        cfg.host = self.host;
        cfg.port = self.port;
        if let Some(app_id) = self.app_id {
            cfg.app_id = app_id;
        }
        if self.long_duration {
            cfg.duration = DurationHint::Long;
        }
        cfg.play_sound = !self.silent;
        cfg.grace = Duration::from_secs(self.grace_secs);
        cfg
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cfg = Cli::parse().into_config();
    let notifier = Arc::new(ToastNotifier::from_config(&cfg));

    match Supervisor::new(cfg, notifier).run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("toastd: {e}");
            ExitCode::FAILURE
        }
    }
}
