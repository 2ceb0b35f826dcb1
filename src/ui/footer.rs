use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{AppState, Screen};
use crate::theme::Theme;

/// Rows used by the footer: status line and key hints.
pub(super) const FOOTER_HEIGHT: u16 = 2;

/// Key hints for `screen`.
const fn key_hints(screen: Screen) -> &'static str {
    match screen {
        Screen::Browse => "↑/↓ move  Enter select  q quit",
        Screen::Search => "Enter search/install  Tab switch focus  ↑/↓ move  Esc back  Ctrl+C quit",
        Screen::Remove => "Enter filter/remove  Tab switch focus  ↑/↓ move  Esc back  Ctrl+C quit",
    }
}

/// Draw the status line (busy indicator or last message) and the key hints.
pub(super) fn render_footer(f: &mut Frame, app: &AppState, area: Rect, th: &Theme) {
    let mut status = Vec::new();
    if app.dry_run {
        status.push(Span::styled(
            "[DRY RUN] ",
            Style::default().fg(th.yellow).add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(pending) = &app.pending {
        status.push(Span::styled(
            pending.label(),
            Style::default().fg(th.yellow),
        ));
    } else if let Some(msg) = &app.status {
        let color = if msg.contains("failed") || msg.starts_with("Could not") {
            th.red
        } else if msg.starts_with("Installed") || msg.starts_with("Removed") {
            th.green
        } else {
            th.text
        };
        status.push(Span::styled(msg.as_str(), Style::default().fg(color)));
    }
    let hints = Line::from(Span::styled(
        key_hints(app.screen),
        Style::default().fg(th.subtext0),
    ));
    f.render_widget(Paragraph::new(vec![Line::from(status), hints]), area);
}
