//! Central `AppState` container threaded through every input handler.

use ratatui::widgets::ListState;

use crate::logic::filter_installed;
use crate::state::types::{Focus, ListItem, PendingOperation, Screen};

/// Subtitle shown for every installed-package row.
pub const INSTALLED_SUBTITLE: &str = "Installed package";

/// Session state shared by the event, runtime, and UI layers.
///
/// There are no ambient globals: handlers receive this value, mutate it, and
/// return an [`Effect`](crate::state::Effect) for the runtime to carry out.
#[derive(Debug)]
pub struct AppState {
    /// Active screen.
    pub screen: Screen,
    /// Focused widget on the Search and Remove screens.
    pub focus: Focus,
    /// Main menu entries.
    pub menu: Vec<ListItem>,
    /// Highlighted main menu entry.
    pub menu_state: ListState,
    /// Text input shared by the Search and Remove screens.
    pub input: String,
    /// Cursor position in `input`, counted in characters.
    pub cursor: usize,
    /// Search results, most popular first.
    pub search_results: Vec<ListItem>,
    /// Highlighted search result.
    pub search_state: ListState,
    /// Full installed-package list as last enumerated.
    pub installed_all: Vec<String>,
    /// Installed packages currently displayed (after filtering).
    pub installed_view: Vec<ListItem>,
    /// Highlighted installed package.
    pub installed_state: ListState,
    /// Operation in flight, if any.
    pub pending: Option<PendingOperation>,
    /// Next search identifier to allocate.
    pub next_query_id: u64,
    /// One-line message shown in the footer.
    pub status: Option<String>,
    /// Last known terminal size (columns, rows).
    pub viewport: (u16, u16),
    /// If `true`, operations are described but not executed.
    pub dry_run: bool,
}

impl Default for AppState {
    fn default() -> Self {
        let mut menu_state = ListState::default();
        menu_state.select(Some(0));
        Self {
            screen: Screen::Browse,
            focus: Focus::InputField,
            menu: vec![
                ListItem::new("Search", "Search the AUR"),
                ListItem::new("Remove", "Remove a package"),
            ],
            menu_state,
            input: String::new(),
            cursor: 0,
            search_results: Vec::new(),
            search_state: ListState::default(),
            installed_all: Vec::new(),
            installed_view: Vec::new(),
            installed_state: ListState::default(),
            pending: None,
            next_query_id: 1,
            status: None,
            viewport: (80, 24),
            dry_run: false,
        }
    }
}

impl AppState {
    /// What: Switch to the Search screen with the input field focused.
    ///
    /// Inputs: None
    ///
    /// Output: None (mutates screen and focus)
    pub fn enter_search(&mut self) {
        self.screen = Screen::Search;
        self.focus = Focus::InputField;
        self.status = None;
    }

    /// What: Switch to the Remove screen showing the full installed list.
    ///
    /// Inputs:
    /// - `names`: Freshly enumerated installed package names
    ///
    /// Output: None (mutates screen, focus, and installed lists)
    pub fn enter_remove(&mut self, names: Vec<String>) {
        self.set_installed(names);
        self.screen = Screen::Remove;
        self.focus = Focus::InputField;
        self.status = None;
    }

    /// What: Return to the main menu and clear the input text.
    ///
    /// Inputs: None
    ///
    /// Output: None
    ///
    /// Details:
    /// - An in-flight search is abandoned so its late result is dropped.
    pub fn back_to_browse(&mut self) {
        self.screen = Screen::Browse;
        self.focus = Focus::InputField;
        self.clear_input();
        if matches!(self.pending, Some(PendingOperation::Search { .. })) {
            self.pending = None;
        }
    }

    /// Clear the shared text input and reset the cursor.
    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    /// What: Replace the search results wholesale.
    ///
    /// Inputs:
    /// - `items`: Rows already sorted for display
    ///
    /// Output: None
    ///
    /// Details:
    /// - Selection moves to the first row, or to nothing when empty.
    pub fn set_search_results(&mut self, items: Vec<ListItem>) {
        self.search_state
            .select(if items.is_empty() { None } else { Some(0) });
        self.search_results = items;
    }

    /// What: Replace the cached installed list and show it unfiltered.
    ///
    /// Inputs:
    /// - `names`: Installed package names
    ///
    /// Output: None
    ///
    /// Details:
    /// - Clears the filter text so the view matches the fresh enumeration.
    pub fn set_installed(&mut self, names: Vec<String>) {
        self.installed_all = names;
        self.clear_input();
        self.apply_remove_filter();
    }

    /// What: Filter the cached installed list by the current input text.
    ///
    /// Inputs: None (uses `input` and `installed_all`)
    ///
    /// Output: None (replaces `installed_view`)
    pub fn apply_remove_filter(&mut self) {
        let view = filter_installed(&self.installed_all, &self.input);
        self.installed_state
            .select(if view.is_empty() { None } else { Some(0) });
        self.installed_view = view;
    }

    /// Selected main menu index, if it points at an existing entry.
    #[must_use]
    pub fn selected_menu_index(&self) -> Option<usize> {
        self.menu_state
            .selected()
            .filter(|&idx| idx < self.menu.len())
    }

    /// Selected search result, if the selection is in range.
    #[must_use]
    pub fn selected_search_result(&self) -> Option<&ListItem> {
        self.search_state
            .selected()
            .and_then(|idx| self.search_results.get(idx))
    }

    /// Selected installed package row, if the selection is in range.
    #[must_use]
    pub fn selected_installed(&self) -> Option<&ListItem> {
        self.installed_state
            .selected()
            .and_then(|idx| self.installed_view.get(idx))
    }

    /// What: Allocate a search id and mark the search as pending.
    ///
    /// Inputs: None
    ///
    /// Output: The allocated identifier
    pub fn begin_search(&mut self) -> u64 {
        let id = self.next_query_id;
        self.next_query_id += 1;
        self.pending = Some(PendingOperation::Search { id });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use crate::state::{Focus, ListItem, Screen};

    #[test]
    /// What: Entering Remove shows every installed package with the field focused.
    ///
    /// - Input: Three names and a stale filter text
    /// - Output: Remove screen, cleared input, full view, first row selected
    fn enter_remove_shows_full_list_and_focuses_field() {
        let mut app = AppState {
            input: "stale".into(),
            cursor: 5,
            focus: Focus::ResultList,
            ..AppState::default()
        };
        app.enter_remove(vec!["git".into(), "htop".into(), "vim".into()]);
        assert_eq!(app.screen, Screen::Remove);
        assert_eq!(app.focus, Focus::InputField);
        assert!(app.input.is_empty());
        assert_eq!(app.installed_view.len(), 3);
        assert_eq!(app.installed_state.selected(), Some(0));
    }

    #[test]
    /// What: Stale out-of-range selections are reported as no selection.
    ///
    /// - Input: Selection index beyond the list end
    /// - Output: `None` from the selection accessors
    fn out_of_range_selection_yields_none() {
        let mut app = AppState::default();
        app.search_results = vec![ListItem::new("a", "")];
        app.search_state.select(Some(4));
        assert!(app.selected_search_result().is_none());
        app.menu_state.select(Some(9));
        assert!(app.selected_menu_index().is_none());
    }

    #[test]
    /// What: Search ids increase monotonically and mark the session busy.
    ///
    /// - Input: Two consecutive `begin_search` calls
    /// - Output: Distinct ids, pending set
    fn begin_search_allocates_increasing_ids() {
        let mut app = AppState::default();
        let first = app.begin_search();
        let second = app.begin_search();
        assert!(second > first);
        assert!(app.pending.is_some());
    }
}
