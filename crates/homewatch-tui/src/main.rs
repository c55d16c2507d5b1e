//! `homewatch-tui`: live terminal panel for a homewatch server.
//!
//! Four screens, switched with the number keys: Alarm, Entry, Kitchen and
//! Bedroom. Each panel is fed by a poller in `homewatch-core`; a background
//! data bridge forwards their updates into the action loop.
//!
//! Logs go to a file (default `/tmp/homewatch-tui.log`) so they never
//! corrupt the terminal.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

#[cfg(test)]
mod testing;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use homewatch_core::{Controller, TlsMode};

use crate::app::App;

/// Terminal panel for monitoring and controlling a homewatch server.
#[derive(Parser, Debug)]
#[command(name = "homewatch-tui", version, about)]
struct Cli {
    /// Server URL (e.g., http://192.168.1.10:5001)
    #[arg(short = 'u', long, env = "HOMEWATCH_URL")]
    url: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(short = 'k', long, env = "HOMEWATCH_INSECURE")]
    insecure: bool,

    /// Log file path
    #[arg(long, default_value = "/tmp/homewatch-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing; stdout belongs to the UI. Hold the guard until exit
/// so buffered lines are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "homewatch_tui={log_level},homewatch_core={log_level},homewatch_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("homewatch-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Config file, then environment, then flags.
fn build_controller(cli: &Cli) -> Result<Controller> {
    let cfg = homewatch_config::load_config()?;
    let mut config = cfg.to_client_config(cli.url.as_deref())?;
    if cli.insecure {
        config.tls = TlsMode::DangerAcceptInvalid;
    }
    Ok(Controller::new(config)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks go in before the terminal switches to raw mode.
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let controller = build_controller(&cli)?;
    info!(url = %controller.config().url, "starting homewatch-tui");

    let mut app = App::new(controller);
    app.run().await?;

    Ok(())
}
