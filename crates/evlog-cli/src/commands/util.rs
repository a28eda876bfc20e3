//! Shared utilities for CLI commands.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use evlog_core::{EntryManager, parse_str};
use tempfile::NamedTempFile;

/// Reads and parses a log file into entries.
pub fn read_log(path: &Path) -> Result<EntryManager> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read log file: {}", path.display()))?;
    let manager = EntryManager::from_events(parse_str(&text))
        .with_context(|| format!("failed to parse log file: {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        entries = manager.len(),
        events = manager.event_count(),
        "loaded log"
    );
    Ok(manager)
}

/// Writes every event in chronological order, each followed by a blank line.
pub fn write_log<W: Write>(writer: &mut W, manager: &EntryManager) -> Result<()> {
    for event in manager.events_sorted() {
        writeln!(writer, "{event}")?;
        writeln!(writer)?;
    }
    Ok(())
}

/// Replaces `path` with `content` through a temporary file in the same directory.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("failed to create directory: {}", parent.display()))?;

    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("failed to create temp file in {}", parent.display()))?;
    tmp.write_all(content)
        .with_context(|| format!("failed to write temp file: {}", tmp.path().display()))?;
    tmp.persist(path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}
