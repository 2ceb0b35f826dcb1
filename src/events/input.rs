//! Shared key handling for the text field and result lists.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;

use crate::logic::{move_selection, select_edge};
use crate::state::AppState;

/// Byte offset of the `cursor`-th character in `s` (or `s.len()`).
fn byte_offset(s: &str, cursor: usize) -> usize {
    s.char_indices().nth(cursor).map_or(s.len(), |(i, _)| i)
}

/// What: Apply an editing key to the shared input field.
///
/// Inputs:
/// - `ke`: Key press
/// - `app`: Session state holding `input` and `cursor`
///
/// Output:
/// - `true` if the key edited the field or moved the cursor.
pub(super) fn edit_input(ke: KeyEvent, app: &mut AppState) -> bool {
    let char_count = app.input.chars().count();
    app.cursor = app.cursor.min(char_count);
    match ke.code {
        KeyCode::Char(ch)
            if !ke
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            let at = byte_offset(&app.input, app.cursor);
            app.input.insert(at, ch);
            app.cursor += 1;
        }
        KeyCode::Backspace if app.cursor > 0 => {
            let at = byte_offset(&app.input, app.cursor - 1);
            app.input.remove(at);
            app.cursor -= 1;
        }
        KeyCode::Delete if app.cursor < char_count => {
            let at = byte_offset(&app.input, app.cursor);
            app.input.remove(at);
        }
        KeyCode::Left => app.cursor = app.cursor.saturating_sub(1),
        KeyCode::Right => app.cursor = (app.cursor + 1).min(char_count),
        KeyCode::Home => app.cursor = 0,
        KeyCode::End => app.cursor = char_count,
        _ => return false,
    }
    true
}

/// What: Apply a navigation key to a result list.
///
/// Inputs:
/// - `ke`: Key press
/// - `state`: Selection state of the list
/// - `len`: Number of rows
/// - `page`: Rows moved by PageUp/PageDown
///
/// Output:
/// - `true` if the key moved the selection.
pub(super) fn navigate_list(ke: KeyEvent, state: &mut ListState, len: usize, page: usize) -> bool {
    let page = isize::try_from(page.max(1)).unwrap_or(isize::MAX);
    match ke.code {
        KeyCode::Up | KeyCode::Char('k') => move_selection(state, len, -1),
        KeyCode::Down | KeyCode::Char('j') => move_selection(state, len, 1),
        KeyCode::PageUp => move_selection(state, len, -page),
        KeyCode::PageDown => move_selection(state, len, page),
        KeyCode::Home | KeyCode::Char('g') => select_edge(state, len, false),
        KeyCode::End | KeyCode::Char('G') => select_edge(state, len, true),
        _ => return false,
    }
    true
}

/// Rows of the result list visible in the current viewport, used as page size.
pub(super) fn page_rows(app: &AppState) -> usize {
    // Frame, input box and footer take roughly ten rows.
    usize::from(app.viewport.1.saturating_sub(10)).max(1)
}
