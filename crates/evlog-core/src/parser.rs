//! Streaming parser turning log lines into events.
//!
//! The parser holds at most one *pending* event: the last header seen, still
//! collecting the metadata lines that follow it. A pending event is yielded
//! only when the next header arrives or the input ends, so events come out
//! complete and in file order (not chronological order).
//!
//! Lines that are not headers are handled leniently:
//! - metadata lines with no preceding header are skipped
//! - unrecognized lines after a header are skipped
//! - unrecognized lines before any header are a [`ParseError::Syntax`]

use std::iter::Enumerate;
use std::str::Lines;

use thiserror::Error;

use crate::event::Event;
use crate::grammar::{self, Line};
use crate::types::ValidationError;

/// Errors that stop a parse. Line numbers are 0-based and count blank lines.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line is neither a header nor attachable to one.
    #[error("syntax error at line {line}: {content}")]
    Syntax { line: usize, content: String },

    /// The line looked like a header but its fields are invalid.
    #[error("invalid event at line {line}")]
    InvalidEvent {
        line: usize,
        #[source]
        source: ValidationError,
    },
}

impl ParseError {
    /// The 0-based index of the offending line.
    pub const fn line(&self) -> usize {
        match self {
            Self::Syntax { line, .. } | Self::InvalidEvent { line, .. } => *line,
        }
    }
}

/// Pull-based parser over any sequence of lines.
///
/// Yields `Ok(event)` per header. After the first error it is exhausted.
#[derive(Debug)]
pub struct EventParser<I> {
    lines: Enumerate<I>,
    pending: Option<Event>,
    finished: bool,
}

impl<I> EventParser<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    pub fn new<T>(lines: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            lines: lines.into_iter().enumerate(),
            pending: None,
            finished: false,
        }
    }

    fn fail(&mut self, error: ParseError) -> Option<Result<Event, ParseError>> {
        self.finished = true;
        self.pending = None;
        Some(Err(error))
    }
}

impl<I> Iterator for EventParser<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<Event, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        while let Some((idx, raw_line)) = self.lines.next() {
            match grammar::classify(raw_line.as_ref()) {
                Line::Blank => {}
                Line::Header(raw) => {
                    let event = match Event::try_from(raw) {
                        Ok(event) => event,
                        Err(source) => {
                            return self.fail(ParseError::InvalidEvent { line: idx, source });
                        }
                    };
                    if let Some(previous) = self.pending.replace(event) {
                        return Some(Ok(previous));
                    }
                }
                Line::Metadata { key, value } => match self.pending.as_mut() {
                    Some(event) => {
                        event.metadata.insert(key, value);
                    }
                    None => {
                        tracing::debug!(line = idx, "skipping metadata line with no preceding event");
                    }
                },
                Line::Unrecognized => {
                    if self.pending.is_none() {
                        let content = raw_line.as_ref().trim_end().to_string();
                        return self.fail(ParseError::Syntax { line: idx, content });
                    }
                    tracing::debug!(line = idx, "skipping unrecognized line");
                }
            }
        }

        self.finished = true;
        self.pending.take().map(Ok)
    }
}

impl<I> std::iter::FusedIterator for EventParser<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
}

/// Parses an in-memory log.
pub fn parse_str(text: &str) -> EventParser<Lines<'_>> {
    EventParser::new(text.lines())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_kind::EventKind;

    fn parse_all(text: &str) -> Result<Vec<Event>, ParseError> {
        parse_str(text).collect()
    }

    #[test]
    fn attaches_trailing_metadata_to_each_header() {
        let text = "2024-01-01 new task-1 \"Do thing\"\n\t\"priority\": \"low\"\n2024-01-05 ! task-1\n\t\"priority\": \"high\"\n";
        let events = parse_all(text).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::Creation);
        assert_eq!(events[0].title, "Do thing");
        assert_eq!(events[0].metadata.get("priority"), Some("low"));
        assert_eq!(events[1].kind, EventKind::Update);
        assert_eq!(events[1].metadata.get("priority"), Some("high"));
    }

    #[test]
    fn later_duplicate_keys_overwrite() {
        let text = "2024-01-01 new a\n\"k\": \"1\"\n\"other\": \"x\"\n\"k\": \"2\"\n";
        let events = parse_all(text).unwrap();
        assert_eq!(events.len(), 1);
        let fields: Vec<_> = events[0].metadata.iter().collect();
        assert_eq!(fields, [("k", "2"), ("other", "x")]);
    }

    #[test]
    fn keeps_file_order() {
        let text = "2024-05-01 new b\n2024-01-01 new a\n";
        let ids: Vec<_> = parse_str(text)
            .map(|e| e.unwrap().entry_id.to_string())
            .collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_all("").unwrap().is_empty());
        assert!(parse_all("\n   \n\t\n").unwrap().is_empty());
    }

    #[test]
    fn garbage_before_any_header_is_syntax_error() {
        let err = parse_all("\ngarbage line\n2024-01-01 new a\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::Syntax {
                line: 1,
                content: "garbage line".to_string()
            }
        );
        assert_eq!(err.line(), 1);
        assert_eq!(err.to_string(), "syntax error at line 1: garbage line");
    }

    #[test]
    fn orphan_metadata_is_skipped() {
        let events = parse_all("\"priority\": \"low\"\n2024-01-01 new a\n").unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].metadata.is_empty());
    }

    #[test]
    fn garbage_after_header_is_skipped() {
        let events = parse_all("2024-01-01 new a\nnot metadata\n\"k\": \"v\"\n").unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].metadata.get("k"), Some("v"));
    }

    #[test]
    fn invalid_date_reports_line() {
        let err = parse_all("2024-01-01 new a\n\n2024-02-30 ! a\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidEvent {
                line: 2,
                source: ValidationError::InvalidDate { .. }
            }
        ));
    }

    #[test]
    fn leap_second_is_invalid_event() {
        let err = parse_all("2024-01-01 23:59:60 new a\n2024-01-02 new b\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidEvent {
                line: 0,
                source: ValidationError::InvalidTime { source: None, .. }
            }
        ));
    }

    #[test]
    fn stops_after_first_error() {
        let mut parser = parse_str("oops\n2024-01-01 new a\n");
        assert!(matches!(parser.next(), Some(Err(ParseError::Syntax { .. }))));
        assert!(parser.next().is_none());
        assert!(parser.next().is_none());
    }

    #[test]
    fn yields_lazily() {
        let mut parser = parse_str("2024-01-01 new a\n2024-01-02 new b\n\"k\": \"v\"\n");
        let first = parser.next().unwrap().unwrap();
        assert_eq!(first.entry_id.as_str(), "a");
        let second = parser.next().unwrap().unwrap();
        assert_eq!(second.metadata.get("k"), Some("v"));
        assert!(parser.next().is_none());
    }

    #[test]
    fn accepts_owned_lines() {
        let lines = vec!["2024-01-01 new a\n".to_string(), "\t\"k\": \"v\"\n".to_string()];
        let events: Vec<_> = EventParser::new(lines).collect::<Result<_, _>>().unwrap();
        assert_eq!(events.len(), 1);
    }
}
