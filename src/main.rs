//! Popstar binary entrypoint kept minimal. The full runtime lives in `app`.

use std::process::ExitCode;
use std::sync::OnceLock;
use std::{fmt, time::SystemTime};

use clap::Parser;
use popstar::{app, args, settings, util};

struct PopstarTimer;

impl tracing_subscriber::fmt::time::FormatTime for PopstarTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let secs = SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .ok()
            .and_then(|d| i64::try_from(d.as_secs()).ok())
            .unwrap_or(0);
        let s = util::ts_to_date(Some(secs)); // "YYYY-MM-DD HH:MM:SS"
        let ts = s.replacen(' ', "-T", 1); // "YYYY-MM-DD-T HH:MM:SS"
        w.write_str(&ts)
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialize tracing to `~/.config/popstar/logs/popstar.log`.
///
/// Inputs:
/// - `level`: Default filter when `RUST_LOG` is unset
///
/// Output: None
///
/// Details:
/// - Falls back to stderr when the log file cannot be opened; the TUI
///   itself never writes log lines to the terminal otherwise.
fn init_logging(level: &str) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    let log_path = settings::logs_dir().join("popstar.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(PopstarTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(PopstarTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = args::Args::parse();
    init_logging(&args::determine_log_level(&args));

    let settings = settings::load_settings(args.config.as_deref());
    tracing::info!(dry_run = args.dry_run, "Popstar starting");
    let code = match app::run(settings, args.dry_run).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Application error");
            eprintln!("popstar: {err}");
            ExitCode::FAILURE
        }
    };
    tracing::info!("Popstar exited");
    code
}
