//! Configuration file parsing utilities.
//!
//! `settings.conf` uses a flat `key = value` format with `#` and `//`
//! comments; these helpers keep the parser itself small.

/// What: Check if a line should be skipped (empty or comment).
///
/// Inputs:
/// - `line`: Line to check
///
/// Output:
/// - `true` if the line should be skipped, `false` otherwise
///
/// Details:
/// - Skips empty lines and lines starting with `#`, `//`, or `;`
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Parse a key-value pair from a line.
///
/// Inputs:
/// - `line`: Line containing key=value format
///
/// Output:
/// - `Some((key, value))` if parsing succeeds, `None` otherwise
///
/// Details:
/// - Splits on the first `=` character
/// - Normalizes the key to lowercase with `.`, `-` and spaces mapped to `_`
/// - Strips an inline comment from the value
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let (raw_key, raw_val) = line.trim().split_once('=')?;
    let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
    if key.is_empty() {
        return None;
    }
    Some((key, strip_inline_comment(raw_val).to_string()))
}

/// What: Remove an inline comment from a value.
///
/// Inputs:
/// - `s`: Raw value text
///
/// Output:
/// - Trimmed text before the first ` #` or `//` marker
///
/// Details:
/// - `//` directly after a URL scheme (`https://`) is kept.
pub fn strip_inline_comment(s: &str) -> &str {
    let mut end = s.len();
    if let Some(i) = s.find(" #") {
        end = end.min(i);
    }
    let mut search_from = 0;
    while let Some(rel) = s[search_from..].find("//") {
        let i = search_from + rel;
        if i > 0 && s.as_bytes()[i - 1] == b':' {
            search_from = i + 2;
            continue;
        }
        end = end.min(i);
        break;
    }
    s[..end].trim()
}

/// What: Interpret a settings value as a boolean.
///
/// Inputs:
/// - `val`: Value text
///
/// Output:
/// - `Some(true)` for `true/1/yes/on`, `Some(false)` for `false/0/no/off`,
///   `None` otherwise
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
