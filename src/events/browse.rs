use crossterm::event::{KeyCode, KeyEvent};

use crate::logic::{move_selection, select_edge};
use crate::state::{AppState, Effect};

/// Menu index of the Search entry.
const MENU_SEARCH: usize = 0;
/// Menu index of the Remove entry.
const MENU_REMOVE: usize = 1;

/// What: Handle a key on the main menu.
///
/// Inputs:
/// - `ke`: Key press
/// - `app`: Session state
///
/// Output:
/// - `Effect::OpenRemove` when the Remove entry is chosen (the runtime loads
///   installed packages before switching), `Effect::Quit` on `q`/`Esc`,
///   otherwise `Effect::None`.
pub(super) fn handle_browse_key(ke: KeyEvent, app: &mut AppState) -> Effect {
    let len = app.menu.len();
    match ke.code {
        KeyCode::Up | KeyCode::Char('k') => move_selection(&mut app.menu_state, len, -1),
        KeyCode::Down | KeyCode::Char('j') => move_selection(&mut app.menu_state, len, 1),
        KeyCode::Home => select_edge(&mut app.menu_state, len, false),
        KeyCode::End => select_edge(&mut app.menu_state, len, true),
        KeyCode::Char('q') | KeyCode::Esc => return Effect::Quit,
        KeyCode::Enter => match app.selected_menu_index() {
            Some(MENU_SEARCH) => app.enter_search(),
            Some(MENU_REMOVE) => return Effect::OpenRemove,
            _ => {}
        },
        _ => {}
    }
    Effect::None
}
