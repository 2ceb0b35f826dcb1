use crossterm::event::{KeyCode, KeyEvent};

use super::input::{edit_input, navigate_list, page_rows};
use crate::logic::package_token;
use crate::state::{AppState, Effect, Focus};

/// What: Handle a key on the Remove screen.
///
/// Inputs:
/// - `ke`: Key press
/// - `app`: Session state
///
/// Output:
/// - `Effect::Remove` when a valid installed package is submitted, otherwise
///   `Effect::None`.
///
/// Details:
/// - Submitting the field filters the cached installed list in place; the
///   package database is not re-read.
pub(super) fn handle_remove_key(ke: KeyEvent, app: &mut AppState) -> Effect {
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
                    navigate_list(
                        ke,
                        &mut app.installed_state,
                        app.installed_view.len(),
                        page,
                    );
                }
            }
            Effect::None
        }
    }
}

/// Enter on the Remove screen: filter from the field, remove from the list.
fn submit(app: &mut AppState) -> Effect {
    match app.focus {
        Focus::InputField => {
            app.apply_remove_filter();
            app.status = Some(format!(
                "{} of {} installed packages",
                app.installed_view.len(),
                app.installed_all.len()
            ));
            Effect::None
        }
        Focus::ResultList => {
            if let Some(pending) = &app.pending {
                app.status = Some(format!("Busy: {}", pending.label()));
                return Effect::None;
            }
            app.selected_installed()
                .and_then(|item| package_token(&item.title))
                .map_or(Effect::None, |name| Effect::Remove {
                    package: name.to_string(),
                })
        }
    }
}
