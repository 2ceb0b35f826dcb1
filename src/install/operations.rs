//! Package operations composed from the runner and the fetcher.

use std::fmt;
use std::path::PathBuf;

use super::fetch::{fetch, repo_name, scratch_dir};
use super::privilege::Elevation;
use super::runner::{CommandSpec, ProcessRunner};
use super::workdir::WorkdirGuard;
use crate::error::PopstarError;
use crate::logic::{results_to_items, sort_by_popularity};
use crate::settings::Settings;
use crate::sources::SearchIndex;
use crate::state::ListItem;
use crate::util::shell_quote;

/// Options for build and removal operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationConfig {
    /// Base URL for clone URLs.
    pub aur_base_url: String,
    /// Scratch directory for clones.
    pub scratch_dir: PathBuf,
    /// Pass `--noconfirm` to `makepkg`.
    pub build_noconfirm: bool,
    /// Pass `--noconfirm` to `pacman -Rns`.
    pub remove_noconfirm: bool,
    /// Keep the clone after a build.
    pub keep_clone: bool,
    /// Describe operations instead of running them.
    pub dry_run: bool,
    /// Wrapper for privileged commands.
    pub elevation: Elevation,
}

impl OperationConfig {
    /// What: Build operation options from settings.
    ///
    /// Inputs:
    /// - `settings`: Loaded settings
    /// - `dry_run`: Effective dry-run flag
    ///
    /// Output: Config with the scratch directory and elevation resolved.
    #[must_use]
    pub fn from_settings(settings: &Settings, dry_run: bool) -> Self {
        Self {
            aur_base_url: settings.aur_base_url.clone(),
            scratch_dir: scratch_dir(&settings.scratch_dir_name),
            build_noconfirm: settings.build_noconfirm,
            remove_noconfirm: settings.remove_noconfirm,
            keep_clone: settings.keep_clone,
            dry_run,
            elevation: Elevation::resolve(settings.privilege_tool),
        }
    }
}

/// Result of a build or removal, reported to the user after the operation.
#[derive(Debug)]
pub enum OperationOutcome {
    /// The package was built and installed.
    Installed {
        /// Package name.
        package: String,
    },
    /// Staging or cloning failed; nothing was built.
    CloneFailed {
        /// Package name.
        package: String,
        /// Cause.
        error: PopstarError,
    },
    /// The clone succeeded but the build or install did not.
    BuildFailed {
        /// Package name.
        package: String,
        /// Cause.
        error: PopstarError,
    },
    /// The working directory could not be restored afterwards.
    DirectoryRestoreFailed {
        /// Package name.
        package: String,
        /// Cause.
        error: PopstarError,
    },
    /// The package was removed.
    Removed {
        /// Package name.
        package: String,
    },
    /// The removal command failed.
    RemovalFailed {
        /// Package name.
        package: String,
        /// Cause.
        error: PopstarError,
    },
    /// Dry run: the commands that would have run.
    DryRun {
        /// Rendered command lines.
        commands: Vec<String>,
    },
}

impl OperationOutcome {
    /// Whether the operation achieved its goal (dry runs count as success).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(
            self,
            Self::Installed { .. } | Self::Removed { .. } | Self::DryRun { .. }
        )
    }
}

impl fmt::Display for OperationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Installed { package } => write!(f, "Installed {package}"),
            Self::CloneFailed { package, error } => write!(f, "Could not fetch {package}: {error}"),
            Self::BuildFailed { package, error } => {
                write!(f, "Building {package} failed: {error}")
            }
            Self::DirectoryRestoreFailed { package, error } => write!(
                f,
                "Could not return to the original directory after {package}: {error}"
            ),
            Self::Removed { package } => write!(f, "Removed {package}"),
            Self::RemovalFailed { package, error } => {
                write!(f, "Could not remove {package}: {error}")
            }
            Self::DryRun { commands } => write!(f, "Dry run: {}", commands.join(" && ")),
        }
    }
}

/// Which step of a build attempt failed.
enum Stage {
    /// Staging or cloning.
    Clone,
    /// Build description check, build or install.
    Build,
}

/// What: Check that `name` can be passed to git and pacman as a package name.
///
/// Inputs:
/// - `name`: Candidate package name
///
/// Output: `Ok(())` or `InvalidPackageName`
///
/// Details:
/// - Arch package names use `[a-z0-9@._+-]` and cannot start with `-` or `.`.
fn validate_package_name(name: &str) -> Result<(), PopstarError> {
    let valid = !name.is_empty()
        && !name.starts_with(['-', '.'])
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@._+-".contains(c));
    if valid {
        Ok(())
    } else {
        Err(PopstarError::InvalidPackageName(name.to_string()))
    }
}

/// Runs package operations through a [`ProcessRunner`].
#[derive(Debug)]
pub struct Orchestrator<R> {
    /// Process runner.
    runner: R,
    /// Options.
    config: OperationConfig,
}

impl<R: ProcessRunner> Orchestrator<R> {
    /// Create an orchestrator.
    pub const fn new(runner: R, config: OperationConfig) -> Self {
        Self { runner, config }
    }

    /// Active options.
    pub const fn config(&self) -> &OperationConfig {
        &self.config
    }

    /// The runner, for other callers that share it.
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Clone URL for `package`: `<aur_base_url>/<package>.git`.
    #[must_use]
    pub fn clone_url(&self, package: &str) -> String {
        format!(
            "{}/{package}.git",
            self.config.aur_base_url.trim_end_matches('/')
        )
    }

    /// `makepkg -si [--noconfirm]`, attached. `makepkg` elevates on its own.
    #[must_use]
    pub fn build_command(&self) -> CommandSpec {
        let mut args = vec!["-si"];
        if self.config.build_noconfirm {
            args.push("--noconfirm");
        }
        CommandSpec::new("makepkg", args).attached()
    }

    /// Elevated `pacman -Rns [--noconfirm] <package>`, attached.
    #[must_use]
    pub fn remove_command(&self, package: &str) -> CommandSpec {
        let mut args = vec!["-Rns"];
        if self.config.remove_noconfirm {
            args.push("--noconfirm");
        }
        args.push(package);
        self.config
            .elevation
            .wrap(CommandSpec::new("pacman", args).attached())
    }

    /// What: Clone, build and install `package`.
    ///
    /// Inputs:
    /// - `package`: Package name
    ///
    /// Output: The outcome; never panics.
    ///
    /// Details:
    /// - The working directory is captured first and restored on every
    ///   path; a failed restore is reported in preference to anything else.
    /// - The scratch directory is removed afterwards unless `keep_clone`.
    pub fn build_and_install(&self, package: &str) -> OperationOutcome {
        if let Err(error) = validate_package_name(package) {
            return OperationOutcome::CloneFailed {
                package: package.to_string(),
                error,
            };
        }
        let url = self.clone_url(package);
        if self.config.dry_run {
            let dest = self.config.scratch_dir.join(repo_name(&url));
            let commands = vec![
                format!(
                    "git clone {} {}",
                    shell_quote(&url),
                    shell_quote(&dest.to_string_lossy())
                ),
                self.build_command().display(),
            ];
            tracing::info!("[Install] dry run: {}", commands.join(" && "));
            return OperationOutcome::DryRun { commands };
        }

        let guard = WorkdirGuard::capture();
        let attempt = self.clone_and_build(&url);
        let restored = guard.restore();
        if !self.config.keep_clone {
            self.discard_scratch();
        }

        let package = package.to_string();
        match (restored, attempt) {
            (Err(error), attempt) => {
                if let Err((_, cause)) = attempt {
                    tracing::warn!("[Install] {package} also failed earlier: {cause}");
                }
                tracing::error!("[Install] {error}");
                OperationOutcome::DirectoryRestoreFailed { package, error }
            }
            (Ok(()), Ok(())) => {
                tracing::info!("[Install] installed {package}");
                OperationOutcome::Installed { package }
            }
            (Ok(()), Err((Stage::Clone, error))) => {
                tracing::warn!("[Install] fetching {package} failed: {error}");
                OperationOutcome::CloneFailed { package, error }
            }
            (Ok(()), Err((Stage::Build, error))) => {
                tracing::warn!("[Install] building {package} failed: {error}");
                OperationOutcome::BuildFailed { package, error }
            }
        }
    }

    /// Fetch `url`, check for a build description and run the build.
    fn clone_and_build(&self, url: &str) -> Result<(), (Stage, PopstarError)> {
        let dir = fetch(&self.runner, url, &self.config.scratch_dir).map_err(|e| (Stage::Clone, e))?;
        if !dir.join("PKGBUILD").is_file() {
            return Err((Stage::Build, PopstarError::MissingBuildFile(dir)));
        }
        self.runner
            .run(&self.build_command())
            .map(|_| ())
            .map_err(|e| (Stage::Build, e))
    }

    /// Remove the scratch directory, logging failures.
    fn discard_scratch(&self) {
        let dir = &self.config.scratch_dir;
        match std::fs::remove_dir_all(dir) {
            Ok(()) => tracing::debug!("[Install] removed {}", dir.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("[Install] could not remove {}: {e}", dir.display()),
        }
    }

    /// What: Remove `package` from the system.
    ///
    /// Inputs:
    /// - `package`: Installed package name
    ///
    /// Output: `Removed`, `RemovalFailed` or `DryRun`.
    pub fn remove(&self, package: &str) -> OperationOutcome {
        if let Err(error) = validate_package_name(package) {
            return OperationOutcome::RemovalFailed {
                package: package.to_string(),
                error,
            };
        }
        let cmd = self.remove_command(package);
        if self.config.dry_run {
            tracing::info!("[Remove] dry run: {}", cmd.display());
            return OperationOutcome::DryRun {
                commands: vec![cmd.display()],
            };
        }
        let package = package.to_string();
        match self.runner.run(&cmd) {
            Ok(_) => {
                tracing::info!("[Remove] removed {package}");
                OperationOutcome::Removed { package }
            }
            Err(error) => {
                tracing::warn!("[Remove] removing {package} failed: {error}");
                OperationOutcome::RemovalFailed { package, error }
            }
        }
    }
}

/// What: Query `index` for `term` and turn the hits into display rows.
///
/// Inputs:
/// - `index`: Remote package index
/// - `term`: Search text
///
/// Output: Rows ordered by non-increasing popularity (ties keep index order).
pub async fn search_and_select<I: SearchIndex + ?Sized>(
    index: &I,
    term: &str,
) -> Result<Vec<ListItem>, PopstarError> {
    let mut packages = index.search(term).await?;
    tracing::debug!("[Search] {} results for {term:?}", packages.len());
    sort_by_popularity(&mut packages);
    Ok(results_to_items(packages))
}
