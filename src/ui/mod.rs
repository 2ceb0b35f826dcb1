//! Rendering of the three screens with ratatui widgets.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem as ListRow, ListState},
};

use crate::state::{AppState, Focus, ListItem, Screen};
use crate::theme::{Theme, theme};

mod footer;
mod input;

/// Window title.
pub const APP_TITLE: &str = "Popstar Repository Helper";

/// What: Draw the whole interface for the current state.
///
/// Inputs:
/// - `f`: Frame to draw into
/// - `app`: Session state (list selections may be adjusted by ratatui)
///
/// Output: None
pub fn ui(f: &mut Frame, app: &mut AppState) {
    let th = theme();
    let area = f.area();

    let outer = Block::default()
        .title(Span::styled(
            format!(" {APP_TITLE} "),
            Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.overlay1))
        .style(Style::default().fg(th.text).bg(th.base));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(footer::FOOTER_HEIGHT)])
        .split(inner);

    match app.screen {
        Screen::Browse => render_menu(f, app, chunks[0], &th),
        Screen::Search | Screen::Remove => render_query_screen(f, app, chunks[0], &th),
    }
    footer::render_footer(f, app, chunks[1], &th);
}

/// Main menu: one row per entry with its description.
fn render_menu(f: &mut Frame, app: &mut AppState, area: Rect, th: &Theme) {
    let list = styled_list(&app.menu, " Menu ", true, th);
    f.render_stateful_widget(list, area, &mut app.menu_state);
}

/// Search and Remove screens: input field above a result list.
fn render_query_screen(f: &mut Frame, app: &mut AppState, area: Rect, th: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    input::render_input(f, app, rows[0], th);

    let list_focused = app.focus == Focus::ResultList;
    let (items, state, title): (&[ListItem], &mut ListState, String) = match app.screen {
        Screen::Remove => (
            &app.installed_view,
            &mut app.installed_state,
            format!(
                " Installed ({} of {}) ",
                app.installed_view.len(),
                app.installed_all.len()
            ),
        ),
        _ => (
            &app.search_results,
            &mut app.search_state,
            format!(" Results ({}) ", app.search_results.len()),
        ),
    };
    let list = styled_list(items, &title, list_focused, th);
    f.render_stateful_widget(list, rows[1], state);
}

/// What: Build a bordered list widget for `items`.
///
/// Inputs:
/// - `items`: Rows to show
/// - `title`: Block title
/// - `focused`: Whether the list currently receives keys
/// - `th`: Palette
///
/// Output: Configured `List`
fn styled_list<'a>(items: &'a [ListItem], title: &'a str, focused: bool, th: &Theme) -> List<'a> {
    let rows: Vec<ListRow> = items
        .iter()
        .map(|item| {
            let mut segs = vec![Span::styled(
                item.title.as_str(),
                Style::default().fg(th.text).add_modifier(Modifier::BOLD),
            )];
            if !item.subtitle.is_empty() {
                segs.push(Span::raw("  "));
                segs.push(Span::styled(
                    item.subtitle.as_str(),
                    Style::default().fg(th.subtext0),
                ));
            }
            ListRow::new(Line::from(segs))
        })
        .collect();
    let border = if focused { th.sapphire } else { th.overlay1 };
    List::new(rows)
        .style(Style::default().fg(th.text).bg(th.base))
        .block(
            Block::default()
                .title(Span::styled(title, Style::default().fg(border)))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border)),
        )
        .highlight_style(Style::default().bg(th.surface1))
        .highlight_symbol("> ")
}
