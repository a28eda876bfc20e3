//! Entries: every event sharing one identifier, kept in chronological order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::event::Event;
use crate::metadata::Metadata;
use crate::types::EntryId;

/// Errors from operations on a single entry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntryError {
    /// The event belongs to another entry.
    #[error("event for {found} cannot be added to entry {expected}")]
    IdMismatch { expected: EntryId, found: EntryId },

    /// Chronological order is derived from the events and cannot be changed.
    #[error("unsupported operation on entry: {operation}")]
    UnsupportedOperation { operation: &'static str },
}

/// Position of an event inside an entry. Equal instants keep insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct EventKey {
    instant: NaiveDateTime,
    seq: u64,
}

/// All events of one entry, sorted by instant.
///
/// An entry is never empty: it is created from its first event.
#[derive(Debug, Clone)]
pub struct Entry {
    id: EntryId,
    events: BTreeMap<EventKey, Event>,
    next_seq: u64,
}

impl Entry {
    /// Creates an entry holding `first`.
    pub fn new(first: Event) -> Self {
        let mut entry = Self {
            id: first.entry_id.clone(),
            events: BTreeMap::new(),
            next_seq: 0,
        };
        entry.insert_sorted(first);
        entry
    }

    pub const fn id(&self) -> &EntryId {
        &self.id
    }

    /// Inserts `event` at its chronological position.
    pub fn add_event(&mut self, event: Event) -> Result<(), EntryError> {
        if event.entry_id != self.id {
            return Err(EntryError::IdMismatch {
                expected: self.id.clone(),
                found: event.entry_id,
            });
        }
        self.insert_sorted(event);
        Ok(())
    }

    /// Insertion for callers that already routed the event by id.
    pub(crate) fn insert_sorted(&mut self, event: Event) {
        debug_assert_eq!(event.entry_id, self.id);
        let key = EventKey {
            instant: event.instant(),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.events.insert(key, event);
    }

    /// Always fails: the order of events is derived from their instants.
    pub fn reverse(&mut self) -> Result<(), EntryError> {
        Err(EntryError::UnsupportedOperation {
            operation: "reverse",
        })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events in chronological order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Event> + ExactSizeIterator {
        self.events.values()
    }

    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.values().nth(index)
    }

    /// The earliest event.
    pub fn first(&self) -> &Event {
        self.events
            .first_key_value()
            .map(|(_, event)| event)
            .expect("entry always holds at least one event")
    }

    /// The latest event.
    pub fn last(&self) -> &Event {
        self.events
            .last_key_value()
            .map(|(_, event)| event)
            .expect("entry always holds at least one event")
    }

    pub fn creation_date_time(&self) -> (NaiveDate, Option<NaiveTime>) {
        let first = self.first();
        (first.date, first.time)
    }

    pub fn last_changed_date_time(&self) -> (NaiveDate, Option<NaiveTime>) {
        let last = self.last();
        (last.date, last.time)
    }

    /// Cumulative metadata after the first `upto` events, or after all of
    /// them when `upto` is `None`. Later values win.
    pub fn metadata(&self, upto: Option<usize>) -> Metadata {
        let upto = upto.unwrap_or(self.events.len());
        let mut state = Metadata::new();
        for event in self.events.values().take(upto) {
            state.merge_from(&event.metadata);
        }
        state
    }

    /// The cumulative metadata snapshot after each event, in order.
    pub fn metadata_history(&self) -> impl Iterator<Item = Metadata> + '_ {
        self.events.values().scan(Metadata::new(), |state, event| {
            state.merge_from(&event.metadata);
            Some(state.clone())
        })
    }

    /// Whether `self` sorts before `other` across entries.
    ///
    /// Last change first; creation only breaks ties on last change.
    pub fn precedes(&self, other: &Self) -> bool {
        (self.last() == other.last() && self.first() < other.first()) || self.last() < other.last()
    }
}

/// Sort order for entries, built from [`Entry::precedes`] alone.
pub fn entry_order(a: &Entry, b: &Entry) -> Ordering {
    if a.precedes(b) {
        Ordering::Less
    } else if b.precedes(a) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}
