//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::entry::EntryArgs;
use crate::commands::events::EventsArgs;
use crate::commands::export::ExportArgs;
use crate::commands::format::FormatArgs;
use crate::commands::table::TableArgs;

/// Personal event logger.
///
/// Reads a plain-text log of dated entry events, groups them by entry and
/// reconstructs each entry's metadata over time.
#[derive(Debug, Parser)]
#[command(name = "evlog", version, about, long_about = None)]
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
    /// Rewrite a log in canonical, chronological form.
    Format(FormatArgs),

    /// Export one row per entry as CSV.
    Csv(ExportArgs),

    /// Print one row per entry.
    Table(TableArgs),

    /// Print every event, oldest first, as JSON lines.
    Events(EventsArgs),

    /// Show the history of a single entry.
    Entry(EntryArgs),
}
