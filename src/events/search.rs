use crossterm::event::{KeyCode, KeyEvent};

use super::input::{edit_input, navigate_list, page_rows};
use crate::logic::package_token;
use crate::state::{AppState, Effect, Focus};

/// What: Handle a key on the Search screen.
///
/// Inputs:
/// - `ke`: Key press
/// - `app`: Session state
///
/// Output:
/// - `Effect::Search` when the field is submitted, `Effect::Install` when a
///   valid result is submitted, otherwise `Effect::None`.
///
/// Details:
/// - Submissions are refused while another operation is pending.
/// - `Esc` returns to the menu and clears the field.
pub(super) fn handle_search_key(ke: KeyEvent, app: &mut AppState) -> Effect {
    match ke.code {
        KeyCode::Esc => {
            app.back_to_browse();
            Effect::None
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = app.focus.toggled();
            Effect::None
        }
        KeyCode::Enter => submit(app),
        _ => {
            match app.focus {
                Focus::InputField => {
                    edit_input(ke, app);
                }
                Focus::ResultList => {
                    let page = page_rows(app);
                    navigate_list(ke, &mut app.search_state, app.search_results.len(), page);
                }
            }
            Effect::None
        }
    }
}

/// Enter on the Search screen: query from the field, install from the list.
fn submit(app: &mut AppState) -> Effect {
    if let Some(pending) = &app.pending {
        app.status = Some(format!("Busy: {}", pending.label()));
        return Effect::None;
    }
    match app.focus {
        Focus::InputField => {
            let term = app.input.trim();
            if term.is_empty() {
                app.status = Some("Type a package name to search".to_string());
                return Effect::None;
            }
            Effect::Search(term.to_string())
        }
        Focus::ResultList => app
            .selected_search_result()
            .and_then(|item| package_token(&item.title))
            .map_or(Effect::None, |name| Effect::Install {
                package: name.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::handle_search_key;
    use crate::state::{AppState, Effect, Focus, ListItem, PendingOperation, Screen};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn search_app() -> AppState {
        let mut app = AppState::default();
        app.enter_search();
        app
    }

    #[test]
    /// What: Submitting the field emits a trimmed search effect.
    ///
    /// - Input: "  htop " typed, Enter
    /// - Output: `Effect::Search("htop")`
    fn enter_in_field_requests_search() {
        let mut app = search_app();
        for ch in "  htop ".chars() {
            handle_search_key(key(KeyCode::Char(ch)), &mut app);
        }
        assert_eq!(
            handle_search_key(key(KeyCode::Enter), &mut app),
            Effect::Search("htop".into())
        );
    }

    #[test]
    /// What: Blank queries are not sent.
    ///
    /// - Input: Enter with an empty field
    /// - Output: No effect and a hint in the status line
    fn blank_query_is_not_sent() {
        let mut app = search_app();
        assert_eq!(handle_search_key(key(KeyCode::Enter), &mut app), Effect::None);
        assert!(app.status.is_some());
    }

    #[test]
    /// What: Enter on the list installs the selected package.
    ///
    /// - Input: Two results, Tab, Down, Enter
    /// - Output: `Effect::Install` for the second row
    fn enter_in_list_requests_install() {
        let mut app = search_app();
        app.set_search_results(vec![
            ListItem::new("htop-vim", "a"),
            ListItem::new("htop", "b"),
        ]);
        handle_search_key(key(KeyCode::Tab), &mut app);
        assert_eq!(app.focus, Focus::ResultList);
        handle_search_key(key(KeyCode::Down), &mut app);
        assert_eq!(
            handle_search_key(key(KeyCode::Enter), &mut app),
            Effect::Install {
                package: "htop".into()
            }
        );
    }

    #[test]
    /// What: Enter on an empty or stale list does nothing.
    ///
    /// - Input: Empty results; then a stale selection index
    /// - Output: `Effect::None`, results untouched
    fn invalid_list_selection_is_noop() {
        let mut app = search_app();
        app.focus = Focus::ResultList;
        assert_eq!(handle_search_key(key(KeyCode::Enter), &mut app), Effect::None);
        app.search_results = vec![ListItem::new("a", "")];
        app.search_state.select(Some(3));
        assert_eq!(handle_search_key(key(KeyCode::Enter), &mut app), Effect::None);
        assert_eq!(app.search_results.len(), 1);
    }

    #[test]
    /// What: A second trigger is refused while an operation is pending.
    ///
    /// - Input: Pending search, Enter with text
    /// - Output: No effect, busy status
    fn pending_operation_blocks_new_triggers() {
        let mut app = search_app();
        app.input = "vim".into();
        app.pending = Some(PendingOperation::Search { id: 1 });
        assert_eq!(handle_search_key(key(KeyCode::Enter), &mut app), Effect::None);
        assert!(app.status.as_deref().is_some_and(|s| s.starts_with("Busy")));
    }

    #[test]
    /// What: Esc returns to the menu and clears the field.
    ///
    /// - Input: Text in the field, Esc
    /// - Output: Browse screen, empty input
    fn esc_returns_to_browse_and_clears() {
        let mut app = search_app();
        app.input = "abc".into();
        app.cursor = 3;
        handle_search_key(key(KeyCode::Esc), &mut app);
        assert_eq!(app.screen, Screen::Browse);
        assert!(app.input.is_empty());
        assert_eq!(app.cursor, 0);
    }
}
