//! Core value types used by Popstar state.

use serde::Deserialize;

use crate::error::PopstarError;

/// One row of any list Popstar displays: menu entries, search results and
/// installed packages all share this shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListItem {
    /// Primary text; for packages this is the package name.
    pub title: String,
    /// Secondary text rendered dimmed under or beside the title.
    pub subtitle: String,
}

impl ListItem {
    /// What: Construct a list row from anything string-like.
    ///
    /// Inputs:
    /// - `title`: Primary text
    /// - `subtitle`: Secondary text
    ///
    /// Output: New `ListItem`
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }
}

/// Which screen is currently active. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Main menu.
    #[default]
    Browse,
    /// Remote package search.
    Search,
    /// Installed package removal.
    Remove,
}

/// Which widget receives raw key input on the Search and Remove screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Text input field at the top of the screen.
    #[default]
    InputField,
    /// Result list below the input field.
    ResultList,
}

impl Focus {
    /// Return the other focus target.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::InputField => Self::ResultList,
            Self::ResultList => Self::InputField,
        }
    }
}

/// Package summary as returned by the remote index.
///
/// Field names follow the AUR RPC payload; nullable fields default to empty.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PackageInfo {
    /// Package name; also the AUR repository name.
    #[serde(rename = "Name")]
    pub name: String,
    /// One-line description.
    #[serde(rename = "Description", default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Version string as reported by the index.
    #[serde(rename = "Version", default)]
    pub version: String,
    /// Popularity score; higher is more popular.
    #[serde(rename = "Popularity", default)]
    pub popularity: f64,
    /// Upstream project URL, when known.
    #[serde(rename = "URL", default, deserialize_with = "null_as_empty")]
    pub url: String,
}

/// Decode a JSON `null` string as an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Results of a search task, correlated with the query that started it.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Identifier echoed from the query.
    pub id: u64,
    /// The entered term, for status messages.
    pub term: String,
    /// Sorted result rows or the lookup error.
    pub result: Result<Vec<ListItem>, PopstarError>,
}

/// The external operation currently in flight, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingOperation {
    /// A remote index lookup.
    Search {
        /// Query identifier the result must echo.
        id: u64,
    },
    /// Clone, build and install of a package.
    Install {
        /// Package being installed.
        package: String,
    },
    /// Removal of an installed package.
    Remove {
        /// Package being removed.
        package: String,
    },
}

impl PendingOperation {
    /// Short label for the status line.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Search { .. } => "Searching…".to_string(),
            Self::Install { package } => format!("Installing {package}…"),
            Self::Remove { package } => format!("Removing {package}…"),
        }
    }
}

/// Side effect requested by an input handler. Handlers never perform I/O;
/// the session loop carries these out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Nothing to do beyond re-rendering.
    None,
    /// End the session.
    Quit,
    /// Look up `term` in the remote index.
    Search(String),
    /// Enumerate installed packages and switch to the Remove screen.
    OpenRemove,
    /// Clone, build and install `package`.
    Install {
        /// Package name (also its repository name).
        package: String,
    },
    /// Remove `package` from the system.
    Remove {
        /// Package name.
        package: String,
    },
}
