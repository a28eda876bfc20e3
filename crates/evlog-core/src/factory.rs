//! Construction of typed events from raw header captures.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::event::{DATE_FORMAT, Event, TIME_FORMAT};
use crate::event_kind::EventKind;
use crate::types::{EntryId, ValidationError};

/// The untyped fields of a matched header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHeader<'a> {
    pub date: &'a str,
    pub time: Option<&'a str>,
    pub kind: &'a str,
    pub entry_id: Option<&'a str>,
    pub title: Option<&'a str>,
}

/// Validates every field again; the grammar accepts shapes, not values
/// (`2024-13-45` is a well-formed date token).
impl TryFrom<RawHeader<'_>> for Event {
    type Error = ValidationError;

    fn try_from(raw: RawHeader<'_>) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(raw.date, DATE_FORMAT).map_err(|source| {
            ValidationError::InvalidDate {
                value: raw.date.to_string(),
                source,
            }
        })?;
        let time = raw.time.map(parse_time).transpose()?;
        let kind: EventKind = raw.kind.parse()?;
        let entry_id = EntryId::new(raw.entry_id.unwrap_or_default())?;

        let mut event = Self::new(date, time, entry_id, kind);
        event.title = raw.title.unwrap_or_default().to_string();
        Ok(event)
    }
}

/// Parses `HH:MM:SS`, rejecting second 60.
fn parse_time(value: &str) -> Result<NaiveTime, ValidationError> {
    let invalid = |source| ValidationError::InvalidTime {
        value: value.to_string(),
        source,
    };
    let time = NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|e| invalid(Some(e)))?;
    if time.nanosecond() >= 1_000_000_000 {
        return Err(invalid(None));
    }
    Ok(time)
}
