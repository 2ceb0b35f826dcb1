use super::InstalledPackages;
use crate::error::PopstarError;
use crate::install::{CommandSpec, ProcessRunner};
use crate::settings::InstalledScope;

/// What: Parse `pacman -Qq` output into sorted package names.
///
/// Inputs:
/// - `stdout`: Raw command output
///
/// Output: Trimmed, non-empty, sorted and de-duplicated names.
pub fn parse_installed(stdout: &[u8]) -> Vec<String> {
    let mut names: Vec<String> = String::from_utf8_lossy(stdout)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(ToString::to_string)
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Installed-package source backed by `pacman -Qq`.
#[derive(Debug, Clone)]
pub struct PacmanInstalled<R> {
    /// Runner used for the captured `pacman` call.
    runner: R,
    /// Which packages to list.
    scope: InstalledScope,
}

impl<R: ProcessRunner> PacmanInstalled<R> {
    /// Create a source that lists `scope` through `runner`.
    pub const fn new(runner: R, scope: InstalledScope) -> Self {
        Self { runner, scope }
    }

    /// The captured `pacman` query for the configured scope.
    #[must_use]
    pub fn query_command(&self) -> CommandSpec {
        let flag = match self.scope {
            InstalledScope::All => "-Qq",
            InstalledScope::Foreign => "-Qqm",
        };
        CommandSpec::new("pacman", [flag])
    }
}

impl<R: ProcessRunner> InstalledPackages for PacmanInstalled<R> {
    fn list(&self) -> Result<Vec<String>, PopstarError> {
        match self.runner.run(&self.query_command()) {
            Ok(out) => Ok(parse_installed(&out.stdout)),
            // `pacman -Qqm` exits 1 when there are no foreign packages.
            Err(PopstarError::ProcessExit { code: Some(1), .. })
                if self.scope == InstalledScope::Foreign =>
            {
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}
