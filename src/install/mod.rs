//! Install subsystem: process runner, repository fetcher, privilege
//! elevation and the package operation orchestrator.

mod fetch;
mod operations;
mod privilege;
mod runner;
mod workdir;

pub use fetch::{fetch, repo_name, scratch_dir, stage_scratch};
pub use operations::{
    OperationConfig, OperationOutcome, Orchestrator, search_and_select,
};
pub use privilege::Elevation;
pub use runner::{Attachment, CommandSpec, ProcessRunner, RunOutput, SystemRunner};
pub use workdir::WorkdirGuard;

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

/// Serializes tests that change the process working directory.
#[cfg(test)]
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
