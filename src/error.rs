//! Error taxonomy shared by the index lookup, the process runner and the
//! package operation pipeline.

use std::fmt;
use std::path::PathBuf;

/// What: Error type for every external interaction Popstar performs.
///
/// Inputs: Generated by the search index, the installed-package source, the
/// process runner and the repository fetcher.
///
/// Output: Implements `Display`/`Error` so callers can log or show it as-is.
///
/// Details:
/// - Out-of-range list selections are not represented here; they are no-ops.
/// - `ProcessExit` keeps the exit code when the child exited normally and
///   `None` when it was killed by a signal.
#[derive(Debug)]
pub enum PopstarError {
    /// The package index could not be reached or answered with a bad status.
    Network(String),
    /// The package index answered with an explicit error payload.
    IndexRejected(String),
    /// The package index answered with a body that could not be decoded.
    Parse(String),
    /// A child process could not be started.
    ProcessSpawn {
        /// Rendered command line that failed to start.
        command: String,
        /// Underlying OS error.
        source: std::io::Error,
    },
    /// A child process ran but exited unsuccessfully.
    ProcessExit {
        /// Rendered command line that failed.
        command: String,
        /// Exit code, if the process was not terminated by a signal.
        code: Option<i32>,
    },
    /// Staging, cleaning or changing into a directory failed.
    Filesystem {
        /// Path the operation was working on.
        path: PathBuf,
        /// Underlying OS error.
        source: std::io::Error,
    },
    /// A repository URL did not yield a usable directory name.
    InvalidUrl(String),
    /// A cloned repository does not contain a build description.
    MissingBuildFile(PathBuf),
    /// A list row did not carry a usable package name.
    InvalidPackageName(String),
}

impl PopstarError {
    /// What: Build a `Filesystem` error for `path`.
    ///
    /// Inputs:
    /// - `path`: Directory or file being operated on
    /// - `source`: I/O error returned by the OS
    ///
    /// Output: `PopstarError::Filesystem`
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for PopstarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::IndexRejected(msg) => write!(f, "package index rejected the query: {msg}"),
            Self::Parse(msg) => write!(f, "malformed index response: {msg}"),
            Self::ProcessSpawn { command, source } => {
                write!(f, "failed to start `{command}`: {source}")
            }
            Self::ProcessExit {
                command,
                code: Some(code),
            } => write!(f, "`{command}` exited with status {code}"),
            Self::ProcessExit { command, code: None } => {
                write!(f, "`{command}` was terminated by a signal")
            }
            Self::Filesystem { path, source } => {
                write!(f, "filesystem error at {}: {source}", path.display())
            }
            Self::InvalidUrl(url) => write!(f, "cannot derive a repository name from {url:?}"),
            Self::MissingBuildFile(dir) => {
                write!(f, "no PKGBUILD found in {}", dir.display())
            }
            Self::InvalidPackageName(name) => write!(f, "{name:?} is not a valid package name"),
        }
    }
}

impl std::error::Error for PopstarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ProcessSpawn { source, .. } | Self::Filesystem { source, .. } => Some(source),
            Self::Network(_)
            | Self::IndexRejected(_)
            | Self::Parse(_)
            | Self::ProcessExit { .. }
            | Self::InvalidUrl(_)
            | Self::MissingBuildFile(_)
            | Self::InvalidPackageName(_) => None,
        }
    }
}

impl From<reqwest::Error> for PopstarError {
    fn from(value: reqwest::Error) -> Self {
        Self::Network(value.to_string())
    }
}

impl From<serde_json::Error> for PopstarError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value.to_string())
    }
}
