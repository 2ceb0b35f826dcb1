//! Event handling layer for Popstar's TUI.
//!
//! Handlers are pure with respect to the outside world: they mutate
//! [`AppState`] and return an [`Effect`] that the runtime carries out.

use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::state::{AppState, Effect, Screen};

mod browse;
mod input;
mod remove;
mod search;

/// Dispatch a single terminal event to the handler of the active screen.
///
/// Returns the effect the session loop should perform next.
pub fn handle_event(ev: &CEvent, app: &mut AppState) -> Effect {
    match ev {
        CEvent::Key(ke) => handle_key(*ke, app),
        CEvent::Resize(cols, rows) => {
            app.viewport = (*cols, *rows);
            Effect::None
        }
        _ => Effect::None,
    }
}

/// Route a key press: global quit first, then the active screen.
fn handle_key(ke: KeyEvent, app: &mut AppState) -> Effect {
    if ke.kind != KeyEventKind::Press {
        return Effect::None;
    }
    if ke.modifiers.contains(KeyModifiers::CONTROL) && matches!(ke.code, KeyCode::Char('c')) {
        return Effect::Quit;
    }
    match app.screen {
        Screen::Browse => browse::handle_browse_key(ke, app),
        Screen::Search => search::handle_search_key(ke, app),
        Screen::Remove => remove::handle_remove_key(ke, app),
    }
}
