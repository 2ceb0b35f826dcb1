use crate::state::{INSTALLED_SUBTITLE, ListItem};

/// What: Filter installed package names by a case-insensitive substring.
///
/// Inputs:
/// - `installed`: Cached installed package names
/// - `text`: Filter text as typed
///
/// Output:
/// - Matching names as display rows, in the cached order.
///
/// Details:
/// - Surrounding whitespace in `text` is ignored; blank text matches everything.
pub fn filter_installed(installed: &[String], text: &str) -> Vec<ListItem> {
    let needle = text.trim().to_lowercase();
    installed
        .iter()
        .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
        .map(|name| ListItem::new(name.clone(), INSTALLED_SUBTITLE))
        .collect()
}

/// What: Extract the package identifier from a list title.
///
/// Inputs:
/// - `title`: Row title, possibly followed by descriptive metadata
///
/// Output:
/// - First whitespace-delimited token, or `None` for a blank title.
pub fn package_token(title: &str) -> Option<&str> {
    title.split_whitespace().next()
}
