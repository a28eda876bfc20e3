//! Core engine for the event logger.
//!
//! This crate contains the fundamental types and logic for:
//! - Grammar: classifying log lines as headers or metadata
//! - Parsing: streaming lines into complete events
//! - Aggregation: grouping events into entries and folding their metadata
//! - Projection: flattening entries into a table for export

mod entry;
pub mod event;
pub mod event_kind;
mod factory;
pub mod grammar;
mod manager;
pub mod metadata;
pub mod parser;
mod types;

pub use entry::{Entry, EntryError, entry_order};
pub use event::Event;
pub use event_kind::EventKind;
pub use factory::RawHeader;
pub use manager::{EntryManager, FIXED_COLUMNS, TABULAR_TIME_FORMAT, Tabular};
pub use metadata::Metadata;
pub use parser::{EventParser, ParseError, parse_str};
pub use types::{EntryId, ValidationError};
