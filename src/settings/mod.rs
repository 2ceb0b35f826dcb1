//! User settings: defaults, `settings.conf` parsing and first-run skeleton.

mod paths;
mod skeleton;

use std::path::Path;

use crate::util::config::{parse_bool, parse_key_value, skip_comment_or_empty};

pub use paths::{config_dir, logs_dir, settings_path};
pub use skeleton::SETTINGS_SKELETON_CONTENT;

/// Wrapper used for commands that need root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrivilegeTool {
    /// Use `sudo` if present, otherwise `doas`.
    #[default]
    Auto,
    /// Always use `sudo`.
    Sudo,
    /// Always use `doas`.
    Doas,
    /// Run privileged commands unwrapped.
    None,
}

impl PrivilegeTool {
    /// Parse a settings value (`auto`, `sudo`, `doas`, `none`).
    #[must_use]
    pub fn from_config_key(val: &str) -> Option<Self> {
        match val.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "sudo" => Some(Self::Sudo),
            "doas" => Some(Self::Doas),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// Which installed packages the Remove screen enumerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstalledScope {
    /// Every installed package (`pacman -Qq`).
    #[default]
    All,
    /// Packages not found in a sync repository (`pacman -Qqm`).
    Foreign,
}

impl InstalledScope {
    /// Parse a settings value (`all`, `foreign`).
    #[must_use]
    pub fn from_config_key(val: &str) -> Option<Self> {
        match val.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "foreign" => Some(Self::Foreign),
            _ => None,
        }
    }
}

/// Runtime settings loaded from `settings.conf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL for clone URLs.
    pub aur_base_url: String,
    /// RPC search endpoint.
    pub search_url: String,
    /// Scratch directory name under the temp root.
    pub scratch_dir_name: String,
    /// Pass `--noconfirm` to `makepkg`.
    pub build_noconfirm: bool,
    /// Pass `--noconfirm` to `pacman -Rns`.
    pub remove_noconfirm: bool,
    /// Keep the clone after a build.
    pub keep_clone: bool,
    /// Wrapper for privileged commands.
    pub privilege_tool: PrivilegeTool,
    /// Which packages the Remove screen lists.
    pub installed_scope: InstalledScope,
    /// Start in dry-run mode.
    pub dry_run_default: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            aur_base_url: "https://aur.archlinux.org".to_string(),
            search_url: "https://aur.archlinux.org/rpc/v5/search".to_string(),
            scratch_dir_name: "popstarTemp".to_string(),
            build_noconfirm: true,
            remove_noconfirm: false,
            keep_clone: false,
            privilege_tool: PrivilegeTool::Auto,
            installed_scope: InstalledScope::All,
            dry_run_default: false,
        }
    }
}

/// What: Apply `settings.conf` content on top of `settings`.
///
/// Inputs:
/// - `content`: File content
/// - `settings`: Settings to update in place
///
/// Output: None
///
/// Details:
/// - Unknown keys and unparsable values are logged and skipped.
/// - Blank string values keep the current value.
pub fn parse_settings(content: &str, settings: &mut Settings) {
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((key, val)) = parse_key_value(line) else {
            continue;
        };
        let applied = match key.as_str() {
            "aur_base_url" => set_string(&mut settings.aur_base_url, &val),
            "search_url" => set_string(&mut settings.search_url, &val),
            "scratch_dir_name" => set_string(&mut settings.scratch_dir_name, &val),
            "build_noconfirm" => set_bool(&mut settings.build_noconfirm, &val),
            "remove_noconfirm" => set_bool(&mut settings.remove_noconfirm, &val),
            "keep_clone" => set_bool(&mut settings.keep_clone, &val),
            "dry_run_default" => set_bool(&mut settings.dry_run_default, &val),
            "privilege_tool" => PrivilegeTool::from_config_key(&val)
                .map(|tool| settings.privilege_tool = tool)
                .is_some(),
            "installed_scope" => InstalledScope::from_config_key(&val)
                .map(|scope| settings.installed_scope = scope)
                .is_some(),
            _ => {
                tracing::debug!(key = %key, "ignoring unknown settings key");
                continue;
            }
        };
        if !applied {
            tracing::warn!(key = %key, value = %val, "ignoring invalid settings value");
        }
    }
}

/// Replace `slot` with a non-blank `val`.
fn set_string(slot: &mut String, val: &str) -> bool {
    if val.is_empty() {
        return false;
    }
    val.clone_into(slot);
    true
}

/// Replace `slot` with the boolean spelled by `val`.
fn set_bool(slot: &mut bool, val: &str) -> bool {
    parse_bool(val).map(|b| *slot = b).is_some()
}

/// What: Load settings from `path`, or from the default location.
///
/// Inputs:
/// - `path`: Explicit settings file (from `--config`), or `None`
///
/// Output: Parsed settings; defaults when the file is missing or unreadable.
///
/// Details:
/// - A missing file is created from the commented skeleton and the
///   defaults are returned.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let mut settings = Settings::default();
    let path = path.map_or_else(settings_path, Path::to_path_buf);
    if !path.exists() {
        if let Err(e) = std::fs::write(&path, SETTINGS_SKELETON_CONTENT) {
            tracing::warn!(path = %path.display(), error = %e, "could not write settings skeleton");
        } else {
            tracing::info!(path = %path.display(), "wrote default settings");
        }
        return settings;
    }
    match std::fs::read_to_string(&path) {
        Ok(content) => parse_settings(&content, &mut settings),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read settings; using defaults");
        }
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::{
        InstalledScope, PrivilegeTool, SETTINGS_SKELETON_CONTENT, Settings, load_settings,
        parse_settings,
    };

    #[test]
    /// What: The skeleton parses back to the defaults.
    ///
    /// - Input: `SETTINGS_SKELETON_CONTENT`
    /// - Output: `Settings::default()`
    fn skeleton_matches_defaults() {
        let mut settings = Settings::default();
        parse_settings(SETTINGS_SKELETON_CONTENT, &mut settings);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    /// What: Recognized keys override defaults; bad values are ignored.
    ///
    /// - Input: Mixed valid and invalid lines
    /// - Output: Valid keys applied, invalid ones left at default
    fn parse_overrides_and_skips_invalid() {
        let content = "\
keep-clone = yes
privilege_tool = doas # prefer doas
installed_scope = foreign
build_noconfirm = perhaps
aur_base_url = https://aur.example.org
scratch_dir_name =
unknown_key = 1
";
        let mut settings = Settings::default();
        parse_settings(content, &mut settings);
        assert!(settings.keep_clone);
        assert_eq!(settings.privilege_tool, PrivilegeTool::Doas);
        assert_eq!(settings.installed_scope, InstalledScope::Foreign);
        assert!(settings.build_noconfirm);
        assert_eq!(settings.aur_base_url, "https://aur.example.org");
        assert_eq!(settings.scratch_dir_name, "popstarTemp");
    }

    #[test]
    /// What: Loading an explicit missing path writes the skeleton.
    ///
    /// - Input: Path inside an empty temp dir; then an edited file
    /// - Output: Defaults plus a new file; then the edited value
    fn load_writes_skeleton_then_reads_it() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.conf");
        assert_eq!(load_settings(Some(&path)), Settings::default());
        assert!(path.is_file());
        std::fs::write(&path, "dry_run_default = true\n").expect("write settings");
        assert!(load_settings(Some(&path)).dry_run_default);
    }

    #[test]
    /// What: Only the documented key and value spellings are accepted.
    ///
    /// - Input: Former alias keys and values (`scratch_dir`, `off`, `aur`, ...)
    /// - Output: Every setting stays at its default
    fn alias_spellings_are_ignored() {
        let content = "\
scratch_dir = elsewhere
app_dry_run_default = true
privilege_tool = off
installed_scope = aur
";
        let mut settings = Settings::default();
        parse_settings(content, &mut settings);
        assert_eq!(settings, Settings::default());
        assert_eq!(PrivilegeTool::from_config_key("off"), None);
        assert_eq!(InstalledScope::from_config_key("aur"), None);
        assert_eq!(PrivilegeTool::from_config_key(" None "), Some(PrivilegeTool::None));
    }
}
