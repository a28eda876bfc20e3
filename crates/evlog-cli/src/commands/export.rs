//! CSV export of the entry table.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use evlog_core::Tabular;

use crate::Config;
use crate::commands::util::read_log;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Log file to read (defaults to the configured log).
    pub path: Option<PathBuf>,
    /// CSV file to create.
    #[arg(short, long)]
    pub output: PathBuf,
}

pub fn run<W: Write>(writer: &mut W, args: &ExportArgs, config: &Config) -> Result<()> {
    let delimiter = csv_delimiter(config.csv_delimiter)?;
    let input = config.resolve_log_path(args.path.as_deref());
    let tabular = read_log(&input)?.to_tabular();

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    write_csv(BufWriter::new(file), &tabular, delimiter)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    writeln!(
        writer,
        "Exported {} entries to {}",
        tabular.rows.len(),
        args.output.display()
    )?;
    Ok(())
}

fn csv_delimiter(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("csv delimiter must be an ASCII character, got {delimiter:?}"))
}

/// Writes the header row then one record per entry.
pub fn write_csv<W: Write>(out: W, tabular: &Tabular, delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(out);
    writer.write_record(&tabular.columns)?;
    for row in &tabular.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    use insta::assert_snapshot;

    const LOG: &str = r#"2024-01-01 new task-1 "Do thing"
	"priority": "low"
	"note": "needs, commas"
2024-01-05 ! task-1
	"priority": "high"
2024-01-02 09:30:00 new task-2
"#;

    #[test]
    fn export_writes_header_and_rows() {
        let temp = tempfile::tempdir().unwrap();
        let log = temp.path().join("events.log");
        let csv_path = temp.path().join("out.csv");
        fs::write(&log, LOG).unwrap();

        let config = Config {
            log_path: log,
            csv_delimiter: ',',
        };
        let args = ExportArgs {
            path: None,
            output: csv_path.clone(),
        };
        let mut output = Vec::new();
        run(&mut output, &args, &config).unwrap();

        assert_snapshot!(fs::read_to_string(&csv_path).unwrap(), @r#"
creation date,creation time,last changed date,last changed time,id,note,priority
2024-01-02,09-30-00,2024-01-02,09-30-00,task-2,,
2024-01-01,,2024-01-05,,task-1,"needs, commas",high
"#);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            format!("Exported 2 entries to {}\n", csv_path.display())
        );
    }

    #[test]
    fn export_uses_configured_delimiter() {
        let tabular = Tabular {
            columns: vec!["id".to_string(), "k".to_string()],
            rows: vec![vec!["a".to_string(), "x;y".to_string()]],
        };
        let mut out = Vec::new();
        write_csv(&mut out, &tabular, b';').unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "id;k\na;\"x;y\"\n");
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        let err = csv_delimiter('§').unwrap_err();
        assert!(err.to_string().contains("ASCII"));
        assert_eq!(csv_delimiter('\t').unwrap(), b'\t');
    }
}
