//! Line classification for the log text format.
//!
//! A log is a sequence of event headers, each optionally followed by
//! metadata lines:
//!
//! ```text
//! 2024-01-01 09:00:00 new task-1 "Do thing"
//! 	"priority": "low"
//! 2024-01-05 ! task-1
//! ```
//!
//! Quoted strings may contain backslash escapes; they are captured verbatim.

use std::sync::LazyLock;

use regex::Regex;

use crate::factory::RawHeader;

/// Whole-line event header: date, optional time, kind, id, optional title.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*([0-9]{4}-[0-9]{2}-[0-9]{2})\s+(?:([0-9]{2}:[0-9]{2}:[0-9]{2})\s+)?(!|new)\s+([A-Za-z0-9_.\-]+)(?:\s+"((?:\\.|[^"])*)")?$"#,
    )
    .unwrap()
});

/// `"key": "value"`, anchored at the start of the line only.
static METADATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*"((?:\\.|[^"])*)"\s*:\s*"((?:\\.|[^"])*)""#).unwrap()
});

/// What a single physical line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty or whitespace only.
    Blank,
    /// An event header.
    Header(RawHeader<'a>),
    /// A metadata field for the preceding header.
    Metadata { key: &'a str, value: &'a str },
    /// Neither grammar matched.
    Unrecognized,
}

/// Classifies one line. Trailing whitespace is ignored.
pub fn classify(line: &str) -> Line<'_> {
    let line = line.trim_end();
    if line.is_empty() {
        return Line::Blank;
    }

    if let Some(caps) = HEADER_RE.captures(line) {
        let field = |i| caps.get(i).map(|m| m.as_str());
        return Line::Header(RawHeader {
            date: field(1).unwrap_or_default(),
            time: field(2),
            kind: field(3).unwrap_or_default(),
            entry_id: field(4),
            title: field(5),
        });
    }

    if let Some(caps) = METADATA_RE.captures(line) {
        let field = |i| caps.get(i).map_or("", |m| m.as_str());
        return Line::Metadata {
            key: field(1),
            value: field(2),
        };
    }

    Line::Unrecognized
}
