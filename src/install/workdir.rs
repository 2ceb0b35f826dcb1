use std::path::PathBuf;

use crate::error::PopstarError;

/// Restores the process working directory captured at construction.
///
/// Call [`WorkdirGuard::restore`] to observe failures; dropping an unrestored
/// guard restores on a best-effort basis and logs errors.
#[derive(Debug)]
pub struct WorkdirGuard {
    /// Directory to return to.
    original: PathBuf,
    /// Set once `restore` has run.
    restored: bool,
}

impl WorkdirGuard {
    /// What: Capture the current working directory.
    ///
    /// Inputs: None
    ///
    /// Output: Guard holding the directory
    ///
    /// Details:
    /// - If the current directory cannot be read (deleted under us), the
    ///   temp directory is used as the restore target.
    #[must_use]
    pub fn capture() -> Self {
        let original = std::env::current_dir().unwrap_or_else(|e| {
            tracing::warn!("[Workdir] current directory unavailable ({e}); using temp dir");
            std::env::temp_dir()
        });
        Self {
            original,
            restored: false,
        }
    }

    /// What: Return to the captured directory.
    ///
    /// Inputs: None (consumes the guard)
    ///
    /// Output: `Ok(())` or a `Filesystem` error naming the directory.
    pub fn restore(mut self) -> Result<(), PopstarError> {
        self.restored = true;
        std::env::set_current_dir(&self.original)
            .map_err(|e| PopstarError::filesystem(&self.original, e))
    }
}

impl Drop for WorkdirGuard {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        if let Err(e) = std::env::set_current_dir(&self.original) {
            tracing::error!(
                "[Workdir] failed to restore {}: {e}",
                self.original.display()
            );
        }
    }
}
