//! Small utility helpers shared across modules.

pub mod config;

use std::time::{SystemTime, UNIX_EPOCH};

/// What: Format a Unix timestamp as a local `YYYY-MM-DD HH:MM:SS` string.
///
/// Inputs:
/// - `ts`: Seconds since the Unix epoch, or `None` for "now"
///
/// Output:
/// - Formatted date-time string; empty if the timestamp is out of range
pub fn ts_to_date(ts: Option<i64>) -> String {
    let secs = ts.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|d| i64::try_from(d.as_secs()).ok())
            .unwrap_or(0)
    });
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_default()
}

/// What: Quote a single shell word for display.
///
/// Inputs:
/// - `word`: Argument text
///
/// Output:
/// - The word unchanged when it only contains safe characters, otherwise
///   wrapped in single quotes with embedded quotes escaped
pub fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=+@%,".contains(c));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', "'\\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::{shell_quote, ts_to_date};

    #[test]
    /// What: Safe words stay bare, others are single-quoted.
    ///
    /// - Input: Plain URL, word with a space, word with a quote, empty word
    /// - Output: Bare, quoted, escaped, `''`
    fn shell_quote_quotes_only_when_needed() {
        assert_eq!(
            shell_quote("https://aur.archlinux.org/htop.git"),
            "https://aur.archlinux.org/htop.git"
        );
        assert_eq!(shell_quote("a b"), "'a b'");
        assert_eq!(shell_quote("it's"), "'it'\\''s'");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    /// What: Timestamps format to the fixed-width date-time layout.
    ///
    /// - Input: Epoch 0
    /// - Output: 19-character string
    fn ts_to_date_has_fixed_width() {
        assert_eq!(ts_to_date(Some(0)).len(), 19);
    }
}
