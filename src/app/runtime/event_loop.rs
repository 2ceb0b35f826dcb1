use std::io::{Stdout, Write};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event as CEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::select;

use super::Services;
use super::background::{Channels, EventReader, discard_buffered_input};
use super::handlers::{apply_search_outcome, finish_operation, open_remove};
use crate::app::terminal::{resume_terminal, suspend_terminal};
use crate::install::{OperationOutcome, ProcessRunner, search_and_select};
use crate::sources::{InstalledPackages, SearchIndex};
use crate::state::{AppState, Effect, PendingOperation, SearchOutcome};
use crate::ui::ui;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Terminal type driven by the session loop.
pub(super) type Tui = Terminal<CrosstermBackend<Stdout>>;

/// What: Run the session loop until the user quits.
///
/// Inputs:
/// - `terminal`: Terminal to draw into
/// - `app`: Session state
/// - `channels`: Event and search channels
/// - `reader`: Terminal event reader (paused during interactive operations)
/// - `services`: Index, installed-package source and orchestrator
///
/// Output: `Ok(())` on quit; `Err` on terminal failures.
pub(super) async fn run_event_loop<I, P, R>(
    terminal: &mut Tui,
    app: &mut AppState,
    channels: &mut Channels,
    reader: &EventReader,
    services: &Services<I, P, R>,
) -> Result<()>
where
    I: SearchIndex + 'static,
    P: InstalledPackages + 'static,
    R: ProcessRunner + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        let effect = select! {
            Some(ev) = channels.event_rx.recv() => crate::events::handle_event(&ev, app),
            Some(outcome) = channels.search_rx.recv() => {
                apply_search_outcome(app, outcome);
                Effect::None
            }
            else => Effect::Quit,
        };

        match effect {
            Effect::None => {}
            Effect::Quit => {
                tracing::info!("[Runtime] quit requested");
                return Ok(());
            }
            Effect::Search(term) => spawn_search(app, channels, services, term),
            Effect::OpenRemove => {
                let installed = Arc::clone(&services.installed);
                let listed = tokio::task::spawn_blocking(move || installed.list()).await;
                match listed {
                    Ok(listed) => open_remove(app, listed),
                    Err(e) => app.status = Some(format!("Could not list installed packages: {e}")),
                }
            }
            Effect::Install { package } => {
                let op = PendingOperation::Install { package };
                run_operation(terminal, app, channels, reader, services, op).await?;
            }
            Effect::Remove { package } => {
                let op = PendingOperation::Remove { package };
                run_operation(terminal, app, channels, reader, services, op).await?;
            }
        }
    }
}

/// What: Start a search task whose result re-enters through `search_tx`.
///
/// Inputs:
/// - `app`: Session state (marked pending)
/// - `channels`: Channels holding the search sender
/// - `services`: Provides the index
/// - `term`: Search text
///
/// Output: None
fn spawn_search<I, P, R>(
    app: &mut AppState,
    channels: &Channels,
    services: &Services<I, P, R>,
    term: String,
) where
    I: SearchIndex + 'static,
{
    let id = app.begin_search();
    tracing::info!("[Runtime] search id={id} term={term:?}");
    let index = Arc::clone(&services.index);
    let tx = channels.search_tx.clone();
    tokio::spawn(async move {
        let result = search_and_select(index.as_ref(), &term).await;
        let _ = tx.send(SearchOutcome { id, term, result });
    });
}

/// What: Run an install or removal with the terminal handed to the child.
///
/// Inputs:
/// - `terminal`: Terminal to suspend and redraw
/// - `app`: Session state
/// - `channels`: Event channel, emptied before input is read again
/// - `reader`: Event reader to pause while the child owns stdin
/// - `services`: Orchestrator and installed-package source
/// - `op`: Operation to run
///
/// Output: `Ok(())`, or `Err` if the terminal cannot be resumed.
///
/// Details:
/// - The loop awaits the blocking operation, so no other operation can start.
/// - The outcome is printed and a keypress is required before the UI returns.
/// - Removals re-enumerate the installed packages afterwards.
/// - Keys queued before the operation are dropped so they cannot start
///   another one.
async fn run_operation<I, P, R>(
    terminal: &mut Tui,
    app: &mut AppState,
    channels: &mut Channels,
    reader: &EventReader,
    services: &Services<I, P, R>,
    op: PendingOperation,
) -> Result<()>
where
    P: InstalledPackages + 'static,
    R: ProcessRunner + 'static,
{
    tracing::info!("[Runtime] starting: {}", op.label());
    app.pending = Some(op.clone());
    reader.pause();
    suspend_terminal()?;
    println!("==> {}", op.label());

    let orchestrator = Arc::clone(&services.orchestrator);
    let is_remove = matches!(op, PendingOperation::Remove { .. });
    let joined = tokio::task::spawn_blocking(move || match op {
        PendingOperation::Install { package } => Some(orchestrator.build_and_install(&package)),
        PendingOperation::Remove { package } => Some(orchestrator.remove(&package)),
        PendingOperation::Search { .. } => None,
    })
    .await;

    let refreshed = if is_remove {
        let installed = Arc::clone(&services.installed);
        tokio::task::spawn_blocking(move || installed.list()).await.ok()
    } else {
        None
    };

    match joined {
        Ok(Some(outcome)) => {
            report_outcome(&outcome);
            finish_operation(app, &outcome, refreshed);
        }
        Ok(None) => app.pending = None,
        Err(e) => {
            tracing::error!("[Runtime] operation task failed: {e}");
            println!("\nOperation aborted: {e}");
            app.pending = None;
            app.status = Some(format!("Operation failed: {e}"));
        }
    }

    let _ = tokio::task::spawn_blocking(wait_for_keypress).await;
    resume_terminal()?;
    terminal.clear()?;
    let dropped = channels.discard_queued_events();
    if dropped > 0 {
        tracing::debug!("[Runtime] dropped {dropped} queued event(s) after operation");
    }
    if let Ok(size) = crossterm::terminal::size() {
        app.viewport = size;
    }
    reader.resume();
    Ok(())
}

/// Print the outcome below the child's output.
fn report_outcome(outcome: &OperationOutcome) {
    let marker = if outcome.is_success() { "==>" } else { "==> ERROR:" };
    println!("\n{marker} {outcome}");
}

/// What: Block until the user presses a key.
///
/// Inputs: None
///
/// Output: None
///
/// Details:
/// - Runs with raw mode so a single key suffices; read errors end the wait.
/// - Input already buffered when the prompt appears does not count.
fn wait_for_keypress() {
    let _ = crossterm::terminal::enable_raw_mode();
    let stale = discard_buffered_input(
        || crossterm::event::poll(Duration::ZERO),
        crossterm::event::read,
    );
    if stale > 0 {
        tracing::debug!("[Runtime] dropped {stale} buffered event(s) before acknowledgement");
    }
    print!("Press any key to return to Popstar...");
    let _ = std::io::stdout().flush();
    loop {
        match crossterm::event::read() {
            Ok(CEvent::Key(ke)) if ke.kind == KeyEventKind::Press => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("[Runtime] acknowledgement read failed: {e}");
                break;
            }
        }
    }
    let _ = crossterm::terminal::disable_raw_mode();
    println!();
}
