//! Narrow interfaces to the remote package index and the local package database.

mod installed;
mod search;

use std::future::Future;

use crate::error::PopstarError;
use crate::state::PackageInfo;

pub use installed::{PacmanInstalled, parse_installed};
pub use search::{AurIndex, decode_search_response};

/// Remote package index that can be queried by free text.
pub trait SearchIndex: Send + Sync {
    /// What: Look up packages matching `term`.
    ///
    /// Inputs:
    /// - `term`: Non-blank search text
    ///
    /// Output:
    /// - Matching packages in index order, or a `Network`, `IndexRejected` or
    ///   `Parse` error.
    fn search(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<Vec<PackageInfo>, PopstarError>> + Send;
}

/// Local package database.
pub trait InstalledPackages: Send + Sync {
    /// What: Enumerate installed package names.
    ///
    /// Inputs: None
    ///
    /// Output: Sorted, de-duplicated names, or the error from the package tool.
    fn list(&self) -> Result<Vec<String>, PopstarError>;
}
