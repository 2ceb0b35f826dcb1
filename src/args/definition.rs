//! Command-line argument definition.

use std::path::PathBuf;

use clap::Parser;

/// Popstar - a small TUI for searching, building and removing AUR packages
#[derive(Parser, Debug)]
#[command(name = "popstar")]
#[command(version)]
#[command(about = "A small TUI for searching, building and removing AUR packages", long_about = None)]
pub struct Args {
    /// Show the commands that would run instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Read settings from this file instead of ~/.config/popstar/settings.conf
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
