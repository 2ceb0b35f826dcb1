//! Utility functions for argument processing.

use super::Args;

/// What: Determine the log level from the command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - The verbose flag overrides `--log-level`.
pub fn determine_log_level(args: &Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}
