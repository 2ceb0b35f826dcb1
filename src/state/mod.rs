//! Session state: the active screen, focus, list datasets and pending work.

pub mod app_state;
pub mod types;

pub use app_state::{AppState, INSTALLED_SUBTITLE};
pub use types::{
    Effect, Focus, ListItem, PackageInfo, PendingOperation, Screen, SearchOutcome,
};
