//! Core non-UI logic: result ordering, installed-list filtering and list
//! selection movement.

pub mod filter;
pub mod selection;
pub mod sort;

pub use filter::{filter_installed, package_token};
pub use selection::{move_selection, select_edge};
pub use sort::{results_to_items, sort_by_popularity};
