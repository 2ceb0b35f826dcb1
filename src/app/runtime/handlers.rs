//! State transitions applied by the session loop when background work completes.

use crate::error::PopstarError;
use crate::install::OperationOutcome;
use crate::state::{AppState, PendingOperation, SearchOutcome};

/// What: Apply a finished search to the session.
///
/// Inputs:
/// - `app`: Session state
/// - `outcome`: Result of the search task
///
/// Output: `true` if the outcome was applied, `false` if it was stale.
///
/// Details:
/// - Only the outcome whose id matches the pending search is applied.
/// - On error the previous results stay and the status line shows the error.
pub fn apply_search_outcome(app: &mut AppState, outcome: SearchOutcome) -> bool {
    if app.pending != Some(PendingOperation::Search { id: outcome.id }) {
        tracing::debug!("[Runtime] dropping stale search result id={}", outcome.id);
        return false;
    }
    app.pending = None;
    match outcome.result {
        Ok(items) => {
            app.status = Some(if items.is_empty() {
                format!("No packages match {:?}", outcome.term)
            } else {
                format!("{} results for {:?}", items.len(), outcome.term)
            });
            app.set_search_results(items);
        }
        Err(e) => {
            tracing::warn!("[Runtime] search for {:?} failed: {e}", outcome.term);
            app.status = Some(format!("Search failed: {e}"));
        }
    }
    true
}

/// What: Switch to the Remove screen with a fresh installed list.
///
/// Inputs:
/// - `app`: Session state
/// - `listed`: Result of enumerating installed packages
///
/// Output: None
///
/// Details:
/// - On failure the session stays on the current screen with a message.
pub fn open_remove(app: &mut AppState, listed: Result<Vec<String>, PopstarError>) {
    match listed {
        Ok(names) => {
            let count = names.len();
            app.enter_remove(names);
            app.status = Some(format!("{count} installed packages"));
        }
        Err(e) => {
            tracing::warn!("[Runtime] listing installed packages failed: {e}");
            app.status = Some(format!("Could not list installed packages: {e}"));
        }
    }
}

/// What: Record the end of an install or removal.
///
/// Inputs:
/// - `app`: Session state
/// - `outcome`: Operation result
/// - `refreshed`: Fresh installed list, when one was taken afterwards
///
/// Output: None
///
/// Details:
/// - Clears the pending operation and shows the outcome in the status line.
/// - A fresh installed list replaces the Remove view in full and clears
///   the filter text; the active screen is not changed.
pub fn finish_operation(
    app: &mut AppState,
    outcome: &OperationOutcome,
    refreshed: Option<Result<Vec<String>, PopstarError>>,
) {
    app.pending = None;
    app.status = Some(outcome.to_string());
    match refreshed {
        Some(Ok(names)) => app.set_installed(names),
        Some(Err(e)) => {
            tracing::warn!("[Runtime] refreshing installed packages failed: {e}");
            app.status = Some(format!("{outcome} (could not refresh list: {e})"));
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_search_outcome, finish_operation, open_remove};
    use crate::error::PopstarError;
    use crate::install::OperationOutcome;
    use crate::state::{AppState, ListItem, Screen, SearchOutcome};

    #[test]
    /// What: Only the outcome for the pending id is applied.
    ///
    /// - Input: Outcome for id 1 while id 2 is pending, then for id 2
    /// - Output: First dropped, second applied and pending cleared
    fn stale_search_outcomes_are_dropped() {
        let mut app = AppState::default();
        app.enter_search();
        let _old = app.begin_search();
        let current = app.begin_search();
        let stale = SearchOutcome {
            id: current - 1,
            term: "a".into(),
            result: Ok(vec![ListItem::new("old", "")]),
        };
        assert!(!apply_search_outcome(&mut app, stale));
        assert!(app.search_results.is_empty());
        let fresh = SearchOutcome {
            id: current,
            term: "a".into(),
            result: Ok(vec![ListItem::new("new", "")]),
        };
        assert!(apply_search_outcome(&mut app, fresh));
        assert_eq!(app.search_results[0].title, "new");
        assert!(app.pending.is_none());
    }

    #[test]
    /// What: A failed search keeps previous results and reports the error.
    ///
    /// - Input: Existing results, then a `Network` error outcome
    /// - Output: Results unchanged, status mentions the failure
    fn failed_search_keeps_results() {
        let mut app = AppState::default();
        app.enter_search();
        app.set_search_results(vec![ListItem::new("htop", "")]);
        let id = app.begin_search();
        apply_search_outcome(
            &mut app,
            SearchOutcome {
                id,
                term: "x".into(),
                result: Err(PopstarError::Network("offline".into())),
            },
        );
        assert_eq!(app.search_results.len(), 1);
        assert_eq!(app.screen, Screen::Search);
        assert!(app.status.as_deref().is_some_and(|s| s.contains("offline")));
    }

    #[test]
    /// What: Listing failures keep the menu on screen.
    ///
    /// - Input: `open_remove` with an error
    /// - Output: Still on Browse with a status message
    fn open_remove_failure_stays_on_browse() {
        let mut app = AppState::default();
        open_remove(
            &mut app,
            Err(PopstarError::ProcessExit {
                command: "pacman -Qq".into(),
                code: Some(1),
            }),
        );
        assert_eq!(app.screen, Screen::Browse);
        assert!(app.status.is_some());
    }

    #[test]
    /// What: After a removal the view shows the fresh list in full.
    ///
    /// - Input: Filter "vi" applied, removal of vim, fresh list {git, htop}
    /// - Output: View equals {git, htop}, filter text cleared
    fn removal_refresh_shows_fresh_set() {
        let mut app = AppState::default();
        app.enter_remove(vec!["git".into(), "htop".into(), "vim".into()]);
        app.input = "vi".into();
        app.apply_remove_filter();
        let outcome = OperationOutcome::Removed {
            package: "vim".into(),
        };
        finish_operation(
            &mut app,
            &outcome,
            Some(Ok(vec!["git".into(), "htop".into()])),
        );
        let titles: Vec<_> = app.installed_view.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["git", "htop"]);
        assert!(app.input.is_empty());
        assert_eq!(app.screen, Screen::Remove);
        assert_eq!(app.status.as_deref(), Some("Removed vim"));
    }

    #[test]
    /// What: Leaving the Search screen abandons the in-flight search.
    ///
    /// - Input: Search started, Esc back to the menu, then its outcome arrives
    /// - Output: Nothing pending; outcome dropped; status and results untouched
    fn search_abandoned_on_back_is_dropped() {
        let mut app = AppState::default();
        app.enter_search();
        let id = app.begin_search();
        app.back_to_browse();
        assert!(app.pending.is_none());
        let late = SearchOutcome {
            id,
            term: "htop".into(),
            result: Ok(vec![ListItem::new("htop", "")]),
        };
        assert!(!apply_search_outcome(&mut app, late));
        assert_eq!(app.screen, Screen::Browse);
        assert!(app.status.is_none());
        assert!(app.search_results.is_empty());
    }
}
