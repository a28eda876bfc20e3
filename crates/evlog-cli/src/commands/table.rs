//! Table command: one row per entry, as aligned text or JSON.

use std::fmt::Write as _;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use evlog_core::Tabular;

use crate::Config;
use crate::commands::util::read_log;

/// Spaces between columns.
const COLUMN_GAP: usize = 2;

#[derive(Debug, Args)]
pub struct TableArgs {
    /// Log file to read (defaults to the configured log).
    pub path: Option<PathBuf>,
    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run<W: Write>(writer: &mut W, args: &TableArgs, config: &Config) -> Result<()> {
    let input = config.resolve_log_path(args.path.as_deref());
    let tabular = read_log(&input)?.to_tabular();

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&tabular)?)?;
    } else {
        write!(writer, "{}", format_table(&tabular))?;
    }
    Ok(())
}

/// Renders the table with left-aligned, padded columns.
pub fn format_table(tabular: &Tabular) -> String {
    let mut widths: Vec<usize> = tabular.columns.iter().map(|c| c.chars().count()).collect();
    for row in &tabular.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    for line in std::iter::once(&tabular.columns).chain(&tabular.rows) {
        let mut rendered = String::new();
        for (cell, width) in line.iter().zip(&widths) {
            let _ = write!(rendered, "{cell:<width$}", width = width + COLUMN_GAP);
        }
        let _ = writeln!(output, "{}", rendered.trim_end());
    }
    output
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    use insta::assert_snapshot;

    const LOG: &str = "2024-01-01 new task-1 \"Do thing\"\n\t\"priority\": \"low\"\n2024-01-05 ! task-1\n\t\"priority\": \"high\"\n2024-01-03 new chore\n\t\"owner\": \"someone\"\n";

    fn run_on(log: &str, json: bool) -> String {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("events.log");
        fs::write(&path, log).unwrap();

        let config = Config {
            log_path: path,
            csv_delimiter: ',',
        };
        let args = TableArgs { path: None, json };
        let mut output = Vec::new();
        run(&mut output, &args, &config).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn table_text_output() {
        let output = run_on(LOG, false);
        assert_snapshot!(output, @r"
creation date  creation time  last changed date  last changed time  id      owner    priority
2024-01-03                    2024-01-03                            chore   someone
2024-01-01                    2024-01-05                            task-1           high
");
    }

    #[test]
    fn table_json_output() {
        let output = run_on(LOG, true);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["columns"].as_array().unwrap().len(), 7);
        assert_eq!(value["rows"][1][4], "task-1");
        assert_eq!(value["rows"][1][6], "high");
    }

    #[test]
    fn empty_log_prints_header_only() {
        let output = run_on("", false);
        assert_eq!(
            output,
            "creation date  creation time  last changed date  last changed time  id\n"
        );
    }
}
