//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Activity time tracker.
///
/// Counts active time spent on documents and keeps per-day totals broken
/// down by language, file and project.
#[derive(Debug, Parser)]
#[command(name = "wk", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record one activity event.
    Record(RecordArgs),

    /// Show today's statistics.
    Today {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show statistics for every recorded day.
    Stats {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Delete all recorded statistics.
    Reset {
        /// Confirm the reset. Without this nothing is deleted.
        #[arg(long)]
        yes: bool,
    },

    /// Track a live session from JSON-lines activity events on stdin.
    ///
    /// Each line is an object with `file`, `language` and optional `project`.
    /// The session summary is printed when stdin closes.
    Watch,
}

/// Arguments for `wk record`.
#[derive(Debug, Args)]
pub struct RecordArgs {
    /// File the activity happened in.
    #[arg(long)]
    pub file: String,

    /// Language of the file (e.g., rust).
    #[arg(long)]
    pub language: String,

    /// Project the file belongs to.
    #[arg(long)]
    pub project: Option<String>,

    /// When the activity happened (ISO 8601). Defaults to now.
    #[arg(long)]
    pub at: Option<String>,
}
