use ratatui::widgets::ListState;

/// What: Move a list selection by `delta` rows, clamped to the list bounds.
///
/// Inputs:
/// - `state`: Selection state of the list
/// - `len`: Number of rows in the list
/// - `delta`: Signed number of rows to move
///
/// Output:
/// - Updates `state`; an empty list clears the selection.
///
/// Details:
/// - A stale out-of-range selection is clamped back into range first.
pub fn move_selection(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let current = state.selected().unwrap_or(0).min(len - 1);
    let next = current.saturating_add_signed(delta).min(len - 1);
    state.select(Some(next));
}

/// What: Jump to the first or last row.
///
/// Inputs:
/// - `state`: Selection state of the list
/// - `len`: Number of rows in the list
/// - `to_end`: `true` for the last row, `false` for the first
///
/// Output:
/// - Updates `state`; an empty list clears the selection.
pub fn select_edge(state: &mut ListState, len: usize, to_end: bool) {
    if len == 0 {
        state.select(None);
    } else if to_end {
        state.select(Some(len - 1));
    } else {
        state.select(Some(0));
    }
}

#[cfg(test)]
mod tests {
    use super::{move_selection, select_edge};
    use ratatui::widgets::ListState;

    #[test]
    /// What: Movement clamps at both ends of the list.
    ///
    /// - Input: Moves past the start and past the end of a 3-row list
    /// - Output: Selection stays at 0 and 2
    fn move_selection_clamps() {
        let mut state = ListState::default();
        state.select(Some(0));
        move_selection(&mut state, 3, -1);
        assert_eq!(state.selected(), Some(0));
        move_selection(&mut state, 3, 10);
        assert_eq!(state.selected(), Some(2));
    }

    #[test]
    /// What: Stale selection is pulled back into range; empty lists clear it.
    ///
    /// - Input: Selection 7 on a 2-row list, then an empty list
    /// - Output: Row 0 after moving up, then `None`
    fn move_selection_handles_stale_and_empty() {
        let mut state = ListState::default();
        state.select(Some(7));
        move_selection(&mut state, 2, -1);
        assert_eq!(state.selected(), Some(0));
        move_selection(&mut state, 0, 1);
        assert_eq!(state.selected(), None);
        select_edge(&mut state, 4, true);
        assert_eq!(state.selected(), Some(3));
    }
}
