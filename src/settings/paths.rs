use std::env;
use std::path::{Path, PathBuf};

/// What: Resolve an XDG base directory from the environment or `$HOME`.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`)
/// - `home_default`: Segments appended to `$HOME` when `var` is unset or blank
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    home_default
        .iter()
        .fold(PathBuf::from(home), |base, seg| base.join(seg))
}

/// Return `$HOME/.config/popstar` if `HOME` is set and the directory can be created.
fn home_config_dir() -> Option<PathBuf> {
    let home = env::var("HOME").ok()?;
    let dir = Path::new(&home).join(".config").join("popstar");
    std::fs::create_dir_all(&dir).ok().map(|()| dir)
}

/// What: Popstar's configuration directory, ensured to exist.
///
/// Inputs: None
///
/// Output: `$HOME/.config/popstar`, or `$XDG_CONFIG_HOME/popstar` when the
/// former cannot be created.
pub fn config_dir() -> PathBuf {
    if let Some(dir) = home_config_dir() {
        return dir;
    }
    let dir = xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join("popstar");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Logs directory under config: `$HOME/.config/popstar/logs` (ensured to exist).
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Default location of `settings.conf`.
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.conf")
}
