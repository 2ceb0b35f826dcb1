use std::sync::Arc;

use ratatui::{Terminal, backend::CrosstermBackend};

use super::terminal::{restore_terminal, setup_terminal};
use crate::install::{OperationConfig, Orchestrator, SystemRunner};
use crate::settings::Settings;
use crate::sources::{AurIndex, PacmanInstalled};
use crate::state::AppState;

mod background;
mod event_loop;
pub mod handlers;

use background::{Channels, spawn_event_thread};
use event_loop::run_event_loop;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// External collaborators used by the session loop.
pub struct Services<I, P, R> {
    /// Remote package index.
    pub index: Arc<I>,
    /// Local package database.
    pub installed: Arc<P>,
    /// Build and removal orchestrator.
    pub orchestrator: Arc<Orchestrator<R>>,
}

/// What: Run the Popstar TUI end-to-end: set up the terminal, spawn the
/// event reader, drive the session loop and restore the terminal on exit.
///
/// Inputs:
/// - `settings`: Loaded settings
/// - `dry_run_flag`: `--dry-run` from the command line (ORed with the
///   settings default)
///
/// Output:
/// - `Ok(())` when the user quits; `Err` if the session cannot start or the
///   terminal fails.
///
/// Details:
/// - Collaborators are built before the terminal is touched, so startup
///   failures leave the shell untouched.
/// - The terminal is restored even when the loop returns an error.
pub async fn run(settings: Settings, dry_run_flag: bool) -> Result<()> {
    let dry_run = dry_run_flag || settings.dry_run_default;
    let services = Services {
        index: Arc::new(AurIndex::new(settings.search_url.clone())?),
        installed: Arc::new(PacmanInstalled::new(SystemRunner, settings.installed_scope)),
        orchestrator: Arc::new(Orchestrator::new(
            SystemRunner,
            OperationConfig::from_settings(&settings, dry_run),
        )),
    };
    tracing::info!(
        dry_run,
        scratch = %services.orchestrator.config().scratch_dir.display(),
        elevation = ?services.orchestrator.config().elevation.wrapper(),
        "[Runtime] starting session"
    );

    setup_terminal()?;
    let mut terminal = match Terminal::new(CrosstermBackend::new(std::io::stdout())) {
        Ok(t) => t,
        Err(e) => {
            let _ = restore_terminal();
            return Err(e.into());
        }
    };

    let mut app = AppState {
        dry_run,
        ..AppState::default()
    };
    if let Ok(size) = crossterm::terminal::size() {
        app.viewport = size;
    }

    let mut channels = Channels::new();
    let reader = spawn_event_thread(channels.event_tx.clone());

    let result = run_event_loop(&mut terminal, &mut app, &mut channels, &reader, &services).await;

    reader.cancel();
    let restored = restore_terminal();
    result?;
    restored
}
