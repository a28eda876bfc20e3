//! Ownership of every entry in a log, plus the read views built over them.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::entry::{Entry, entry_order};
use crate::event::{DATE_FORMAT, Event};
use crate::parser::ParseError;
use crate::types::EntryId;

/// Fixed leading columns of the tabular projection.
pub const FIXED_COLUMNS: [&str; 5] = [
    "creation date",
    "creation time",
    "last changed date",
    "last changed time",
    "id",
];

/// Time format used in tabular cells.
pub const TABULAR_TIME_FORMAT: &str = "%H-%M-%S";

/// One row per entry: timestamps, id, then the cumulative metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tabular {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// All entries of a log, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct EntryManager {
    entries: BTreeMap<EntryId, Entry>,
}

impl EntryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests events until the source is exhausted or yields an error.
    ///
    /// Events before the error are discarded along with it.
    pub fn from_events<I>(events: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = Result<Event, ParseError>>,
    {
        let mut manager = Self::new();
        for event in events {
            manager.add_event(event?);
        }
        Ok(manager)
    }

    /// Routes `event` to its entry, creating the entry on first sight.
    pub fn add_event(&mut self, event: Event) {
        if let Some(entry) = self.entries.get_mut(event.entry_id.as_str()) {
            entry.insert_sorted(event);
        } else {
            tracing::trace!(entry = %event.entry_id, "new entry");
            self.entries.insert(event.entry_id.clone(), Entry::new(event));
        }
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.get(id)
    }

    /// Entries in id order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &Entry> {
        self.entries.values()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of events across all entries.
    pub fn event_count(&self) -> usize {
        self.entries.values().map(Entry::len).sum()
    }

    /// Every event of every entry, sorted chronologically.
    ///
    /// The sort is stable; events at the same instant stay in entry-id order,
    /// then insertion order.
    pub fn events_sorted(&self) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.entries.values().flat_map(Entry::iter).collect();
        events.sort();
        events
    }

    /// Every distinct metadata key seen in any event.
    pub fn metadata_fields(&self) -> BTreeSet<String> {
        self.entries
            .values()
            .flat_map(Entry::iter)
            .flat_map(|event| event.metadata.keys())
            .map(str::to_string)
            .collect()
    }

    /// Entries in cross-entry order (see [`Entry::precedes`]).
    pub fn entries_sorted(&self) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.entries.values().collect();
        entries.sort_by(|a, b| entry_order(a, b));
        entries
    }

    /// Flattens the log to one row per entry.
    ///
    /// Metadata columns follow the fixed columns in key order; a cell is empty
    /// when the entry never set that field.
    pub fn to_tabular(&self) -> Tabular {
        let fields = self.metadata_fields();
        let columns: Vec<String> = FIXED_COLUMNS
            .iter()
            .map(|c| (*c).to_string())
            .chain(fields.iter().cloned())
            .collect();
        let field_index: BTreeMap<&str, usize> = fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.as_str(), FIXED_COLUMNS.len() + i))
            .collect();

        let rows = self
            .entries_sorted()
            .into_iter()
            .map(|entry| {
                let mut row = vec![String::new(); columns.len()];
                let (c_date, c_time) = entry.creation_date_time();
                let (l_date, l_time) = entry.last_changed_date_time();
                row[0] = c_date.format(DATE_FORMAT).to_string();
                row[1] = c_time.map(|t| t.format(TABULAR_TIME_FORMAT).to_string()).unwrap_or_default();
                row[2] = l_date.format(DATE_FORMAT).to_string();
                row[3] = l_time.map(|t| t.format(TABULAR_TIME_FORMAT).to_string()).unwrap_or_default();
                row[4] = entry.id().to_string();
                for (key, value) in entry.metadata(None).iter() {
                    if let Some(&i) = field_index.get(key) {
                        row[i] = value.to_string();
                    }
                }
                row
            })
            .collect();

        Tabular { columns, rows }
    }
}

impl Extend<Event> for EntryManager {
    fn extend<T: IntoIterator<Item = Event>>(&mut self, iter: T) {
        for event in iter {
            self.add_event(event);
        }
    }
}

impl FromIterator<Event> for EntryManager {
    fn from_iter<T: IntoIterator<Item = Event>>(iter: T) -> Self {
        let mut manager = Self::new();
        manager.extend(iter);
        manager
    }
}
