//! Timestamped facts about an entry.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::event_kind::EventKind;
use crate::metadata::Metadata;
use crate::types::EntryId;

/// Date format used in headers and tabular output.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format used in headers.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// One dated record in the log.
///
/// # Ordering
///
/// Events compare by [`Event::instant`] alone. Two events at the same instant
/// are equal even when their kind, entry or metadata differ; entry and
/// manager sorting rely on this.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    pub entry_id: EntryId,
    pub kind: EventKind,
    /// Free-text label, empty when the header has none.
    pub title: String,
    /// Fields attached to this event only, not merged with history.
    pub metadata: Metadata,
}

impl Event {
    /// Creates an event without title or metadata.
    pub fn new(date: NaiveDate, time: Option<NaiveTime>, entry_id: EntryId, kind: EventKind) -> Self {
        Self {
            date,
            time,
            entry_id,
            kind,
            title: String::new(),
            metadata: Metadata::new(),
        }
    }

    /// The moment used for ordering; date-only events sit at midnight.
    pub fn instant(&self) -> NaiveDateTime {
        self.date.and_time(self.time.unwrap_or_default())
    }

    /// The header line alone, without metadata.
    pub fn header_line(&self) -> String {
        let mut parts = vec![self.date.format(DATE_FORMAT).to_string()];
        if let Some(time) = self.time {
            parts.push(time.format(TIME_FORMAT).to_string());
        }
        parts.push(self.kind.as_token().to_string());
        parts.push(self.entry_id.to_string());
        if !self.title.is_empty() {
            parts.push(format!("\"{}\"", self.title));
        }
        parts.join(" ")
    }
}

/// Canonical serialization: the header followed by one tab-indented line per
/// metadata field.
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header_line())?;
        for (key, value) in self.metadata.iter() {
            write!(f, "\n\t\"{key}\": \"{value}\"")?;
        }
        Ok(())
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.instant() == other.instant()
    }
}

impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant().cmp(&other.instant())
    }
}
