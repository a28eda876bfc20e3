//! Events command: every event, oldest first, as JSONL.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::Config;
use crate::commands::util::read_log;

#[derive(Debug, Args)]
pub struct EventsArgs {
    /// Log file to read (defaults to the configured log).
    pub path: Option<PathBuf>,
}

pub fn run<W: Write>(writer: &mut W, args: &EventsArgs, config: &Config) -> Result<()> {
    let input = config.resolve_log_path(args.path.as_deref());
    let manager = read_log(&input)?;

    for event in manager.events_sorted() {
        let line = serde_json::to_string(event).context("failed to serialize event")?;
        // Stop quietly when the reader goes away (e.g., piped to `head`)
        match writeln!(writer, "{line}") {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => break,
            Err(e) => return Err(e).context("failed to write event"),
        }
    }
    Ok(())
}
