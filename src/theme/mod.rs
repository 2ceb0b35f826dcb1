//! Color palette used by the renderer (Catppuccin Mocha).

use ratatui::style::Color;

/// Application theme palette used by rendering code.
///
/// All colors are provided as [`ratatui::style::Color`] and are suitable for
/// direct use with widgets and styles.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    /// Primary background color for the canvas.
    pub base: Color,
    /// Background of the highlighted list row.
    pub surface1: Color,
    /// Border color of unfocused panels.
    pub overlay1: Color,
    /// Primary foreground text color.
    pub text: Color,
    /// Secondary text (subtitles, hints).
    pub subtext0: Color,
    /// Border color of the focused panel and the highlight symbol.
    pub sapphire: Color,
    /// Title color.
    pub mauve: Color,
    /// Success messages.
    pub green: Color,
    /// Busy indicator and dry-run marker.
    pub yellow: Color,
    /// Error messages.
    pub red: Color,
}

/// Catppuccin Mocha.
const MOCHA: Theme = Theme {
    base: Color::Rgb(0x1e, 0x1e, 0x2e),
    surface1: Color::Rgb(0x45, 0x47, 0x5a),
    overlay1: Color::Rgb(0x7f, 0x84, 0x9c),
    text: Color::Rgb(0xcd, 0xd6, 0xf4),
    subtext0: Color::Rgb(0xa6, 0xad, 0xc8),
    sapphire: Color::Rgb(0x74, 0xc7, 0xec),
    mauve: Color::Rgb(0xcb, 0xa6, 0xf7),
    green: Color::Rgb(0xa6, 0xe3, 0xa1),
    yellow: Color::Rgb(0xf9, 0xe2, 0xaf),
    red: Color::Rgb(0xf3, 0x8b, 0xa8),
};

/// Return the active palette.
#[must_use]
pub const fn theme() -> Theme {
    MOCHA
}
