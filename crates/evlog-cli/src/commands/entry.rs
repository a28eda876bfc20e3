//! Entry command: one entry's events with the metadata known after each.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use evlog_core::{Entry, Metadata};

use crate::Config;
use crate::commands::util::read_log;

#[derive(Debug, Args)]
pub struct EntryArgs {
    /// Entry ID to show.
    pub id: String,
    /// Log file to read (defaults to the configured log).
    pub path: Option<PathBuf>,
}

pub fn run<W: Write>(writer: &mut W, args: &EntryArgs, config: &Config) -> Result<()> {
    let input = config.resolve_log_path(args.path.as_deref());
    let manager = read_log(&input)?;
    let Some(entry) = manager.get(&args.id) else {
        bail!("entry not found: {}", args.id);
    };

    write_history(writer, entry)
}

fn write_history<W: Write>(writer: &mut W, entry: &Entry) -> Result<()> {
    let (created, _) = entry.creation_date_time();
    let (changed, _) = entry.last_changed_date_time();
    writeln!(
        writer,
        "{}: {} events, created {created}, last changed {changed}",
        entry.id(),
        entry.len()
    )?;

    for (event, state) in entry.iter().zip(entry.metadata_history()) {
        writeln!(writer)?;
        writeln!(writer, "{event}")?;
        writeln!(writer, "  => {}", describe(&state))?;
    }
    Ok(())
}

fn describe(state: &Metadata) -> String {
    if state.is_empty() {
        return "(no metadata)".to_string();
    }
    state
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}
