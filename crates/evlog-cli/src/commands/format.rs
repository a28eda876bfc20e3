//! Format command: rewrites a log in canonical form, oldest event first.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::Config;
use crate::commands::util::{read_log, write_atomic, write_log};

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Log file to read (defaults to the configured log).
    pub path: Option<PathBuf>,
    /// Write here instead of rewriting the input in place.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run<W: Write>(writer: &mut W, args: &FormatArgs, config: &Config) -> Result<()> {
    let input = config.resolve_log_path(args.path.as_deref());
    let manager = read_log(&input)?;

    let mut content = Vec::new();
    write_log(&mut content, &manager)?;

    let output = args.output.clone().unwrap_or(input);
    write_atomic(&output, &content)?;
    tracing::info!(path = %output.display(), "formatted log");

    writeln!(
        writer,
        "Formatted {} events in {} entries to {}",
        manager.event_count(),
        manager.len(),
        output.display()
    )?;
    Ok(())
}
