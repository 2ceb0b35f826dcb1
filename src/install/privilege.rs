//! Per-command privilege elevation.

use super::runner::CommandSpec;
use crate::settings::PrivilegeTool;

/// Resolved wrapper for commands that need root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Elevation {
    /// Wrapper program, or `None` when commands already run as root.
    wrapper: Option<String>,
}

impl Elevation {
    /// What: Resolve the wrapper for `tool` on this system.
    ///
    /// Inputs:
    /// - `tool`: Configured preference
    ///
    /// Output: Elevation to apply to privileged commands.
    ///
    /// Details:
    /// - Running as root needs no wrapper.
    /// - `Auto` prefers `sudo`, then `doas`, and falls back to `sudo` so the
    ///   failure names a real tool when neither is installed.
    #[must_use]
    pub fn resolve(tool: PrivilegeTool) -> Self {
        if running_as_root() {
            return Self::none();
        }
        let wrapper = match tool {
            PrivilegeTool::Auto => ["sudo", "doas"]
                .into_iter()
                .find(|cmd| which::which(cmd).is_ok())
                .unwrap_or("sudo"),
            PrivilegeTool::Sudo => "sudo",
            PrivilegeTool::Doas => "doas",
            PrivilegeTool::None => return Self::none(),
        };
        tracing::debug!("[Privilege] using {wrapper}");
        Self::wrapped_by(wrapper)
    }

    /// Elevation through `wrapper`.
    #[must_use]
    pub fn wrapped_by(wrapper: impl Into<String>) -> Self {
        Self {
            wrapper: Some(wrapper.into()),
        }
    }

    /// No elevation.
    #[must_use]
    pub const fn none() -> Self {
        Self { wrapper: None }
    }

    /// The wrapper program, if any.
    #[must_use]
    pub fn wrapper(&self) -> Option<&str> {
        self.wrapper.as_deref()
    }

    /// What: Prefix `cmd` with the wrapper.
    ///
    /// Inputs:
    /// - `cmd`: Command that needs root
    ///
    /// Output: `wrapper program args...`, or `cmd` unchanged without a wrapper.
    #[must_use]
    pub fn wrap(&self, cmd: CommandSpec) -> CommandSpec {
        match &self.wrapper {
            None => cmd,
            Some(wrapper) => CommandSpec {
                program: wrapper.clone(),
                args: std::iter::once(cmd.program).chain(cmd.args).collect(),
                attachment: cmd.attachment,
            },
        }
    }
}

/// Whether the effective user is root.
#[cfg(unix)]
fn running_as_root() -> bool {
    nix::unistd::geteuid().is_root()
}

/// Whether the effective user is root.
#[cfg(not(unix))]
const fn running_as_root() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::Elevation;
    use crate::install::CommandSpec;
    use crate::settings::PrivilegeTool;

    #[test]
    /// What: Wrapping prefixes the wrapper and keeps the attachment.
    ///
    /// - Input: Attached `pacman -Rns vim` wrapped by doas
    /// - Output: `doas pacman -Rns vim`, still attached
    fn wrap_prefixes_wrapper() {
        let cmd = CommandSpec::new("pacman", ["-Rns", "vim"]).attached();
        let wrapped = Elevation::wrapped_by("doas").wrap(cmd.clone());
        assert_eq!(wrapped.display(), "doas pacman -Rns vim");
        assert_eq!(wrapped.attachment, cmd.attachment);
        assert_eq!(Elevation::none().wrap(cmd.clone()), cmd);
    }

    #[test]
    /// What: The `none` preference never wraps.
    ///
    /// - Input: `PrivilegeTool::None`
    /// - Output: No wrapper
    fn none_preference_never_wraps() {
        assert_eq!(Elevation::resolve(PrivilegeTool::None).wrapper(), None);
    }
}
