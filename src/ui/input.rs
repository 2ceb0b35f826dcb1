use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::state::{AppState, Focus, Screen};
use crate::theme::Theme;

/// Placeholder shown while the field is empty.
const PLACEHOLDER: &str = "Search...";

/// Draw the text field and place the terminal cursor in it when focused.
pub(super) fn render_input(f: &mut Frame, app: &AppState, area: Rect, th: &Theme) {
    let focused = app.focus == Focus::InputField;
    let title = match app.screen {
        Screen::Remove => " Filter installed ",
        _ => " Search the AUR ",
    };
    let border = if focused { th.sapphire } else { th.overlay1 };
    let line = if app.input.is_empty() {
        Line::from(Span::styled(PLACEHOLDER, Style::default().fg(th.subtext0)))
    } else {
        Line::from(Span::styled(
            app.input.as_str(),
            Style::default().fg(if focused { th.text } else { th.subtext0 }),
        ))
    };
    let paragraph = Paragraph::new(line).block(
        Block::default()
            .title(Span::styled(title, Style::default().fg(border)))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(paragraph, area);

    if focused && area.width > 2 && area.height > 2 {
        let before: String = app.input.chars().take(app.cursor).collect();
        let offset = u16::try_from(before.width()).unwrap_or(u16::MAX);
        let x = area.x + 1 + offset.min(area.width - 3);
        f.set_cursor_position(Position::new(x, area.y + 1));
    }
}
