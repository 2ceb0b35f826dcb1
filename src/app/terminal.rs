use crossterm::{
    cursor::Show,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Enter raw mode and the alternate screen.
pub fn setup_terminal() -> Result<()> {
    enable_raw_mode()?;
    execute!(std::io::stdout(), EnterAlternateScreen)?;
    Ok(())
}

/// Leave the alternate screen and raw mode.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(std::io::stdout(), LeaveAlternateScreen, Show)?;
    Ok(())
}

/// What: Hand the real terminal to a child process.
///
/// Inputs: None
///
/// Output: `Ok(())` or the terminal error
///
/// Details:
/// - Same as [`restore_terminal`]; the child's output then lands in the
///   normal screen buffer where it stays visible after the TUI resumes.
pub fn suspend_terminal() -> Result<()> {
    restore_terminal()
}

/// Take the terminal back after [`suspend_terminal`].
pub fn resume_terminal() -> Result<()> {
    setup_terminal()
}
