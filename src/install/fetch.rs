//! Cloning a package repository into a clean scratch directory.

use std::path::{Path, PathBuf};

use super::runner::{CommandSpec, ProcessRunner};
use crate::error::PopstarError;

/// What: Derive the clone directory name from a repository URL.
///
/// Inputs:
/// - `url`: Remote repository URL
///
/// Output: Final path segment with a trailing `/` ignored and a trailing
/// `.git` removed; may be empty.
///
/// Details:
/// - `https://host/group/foo-bar.git` yields `foo-bar`.
pub fn repo_name(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    let last = trimmed.rsplit('/').next().unwrap_or(trimmed);
    last.strip_suffix(".git").unwrap_or(last)
}

/// Scratch directory `name` under the system temp directory.
pub fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(name)
}

/// What: Remove `dir` if present and recreate it empty.
///
/// Inputs:
/// - `dir`: Scratch directory
///
/// Output: `Ok(())` or a `Filesystem` error.
pub fn stage_scratch(dir: &Path) -> Result<(), PopstarError> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(PopstarError::filesystem(dir, e)),
    }
    std::fs::create_dir_all(dir).map_err(|e| PopstarError::filesystem(dir, e))
}

/// What: Classify a failed `git clone`.
///
/// Inputs:
/// - `err`: Error from the runner
///
/// Output: `Network` for a non-zero git exit; other errors unchanged.
fn clone_failure(err: PopstarError) -> PopstarError {
    match err {
        PopstarError::ProcessExit { command, code } => PopstarError::Network(match code {
            Some(code) => format!("`{command}` exited with status {code}"),
            None => format!("`{command}` was terminated by a signal"),
        }),
        other => other,
    }
}

/// What: Clone `url` into a fresh `scratch` directory and enter the clone.
///
/// Inputs:
/// - `runner`: Executes `git clone` on a pseudo-terminal
/// - `url`: Remote repository URL
/// - `scratch`: Scratch directory, cleared first
///
/// Output: Path of the clone, which is now the working directory. A git
/// failure is reported as `Network`.
///
/// Details:
/// - The caller is responsible for restoring the previous working directory.
pub fn fetch<R: ProcessRunner + ?Sized>(
    runner: &R,
    url: &str,
    scratch: &Path,
) -> Result<PathBuf, PopstarError> {
    let name = repo_name(url);
    if name.is_empty() {
        return Err(PopstarError::InvalidUrl(url.to_string()));
    }
    stage_scratch(scratch)?;
    let dest = scratch.join(name);
    tracing::info!("[Fetch] cloning {url} into {}", dest.display());
    runner.run(
        &CommandSpec::new(
            "git",
            [
                "clone".to_string(),
                url.to_string(),
                dest.to_string_lossy().into_owned(),
            ],
        )
        .attached(),
    )
    .map_err(clone_failure)?;
    std::env::set_current_dir(&dest).map_err(|e| PopstarError::filesystem(&dest, e))?;
    Ok(dest)
}
