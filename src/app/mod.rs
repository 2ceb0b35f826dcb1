//! Application runtime: terminal lifecycle and the session loop.

mod runtime;
mod terminal;

pub use runtime::handlers::{apply_search_outcome, finish_operation, open_remove};
pub use runtime::{Services, run};
