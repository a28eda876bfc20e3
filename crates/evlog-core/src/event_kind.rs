//! Event kind enum as the single source of truth for header tokens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::ValidationError;

/// Whether an event opens an entry or records a later change to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// First record of an entry, written `new`.
    Creation,
    /// Subsequent record of an entry, written `!`.
    Update,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 2] = [Self::Creation, Self::Update];

    /// The token used in log headers.
    #[must_use]
    pub const fn as_token(&self) -> &'static str {
        match self {
            Self::Creation => "new",
            Self::Update => "!",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for EventKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::Creation),
            "!" => Ok(Self::Update),
            _ => Err(ValidationError::UnknownEventKind {
                token: s.to_string(),
            }),
        }
    }
}

impl Serialize for EventKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_token())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
