//! Integer note identifier assigned by the store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A unique identifier for notes.
///
/// Ids are assigned by the store when a note is created and never change
/// afterwards. They are strictly positive and never reused, so listings
/// ordered by id are stable across deletions.
///
/// # Examples
///
/// ```
/// use noteshare::domain::NoteId;
///
/// let id: NoteId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(i64);

impl NoteId {
    /// Wraps a raw row id.
    pub(crate) fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId({})", self.0)
    }
}

/// Error returned when parsing an invalid note id.
#[derive(Debug, Clone)]
pub struct ParseNoteIdError {
    value: String,
}

impl fmt::Display for ParseNoteIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid note id '{}': expected a positive integer",
            self.value
        )
    }
}

impl std::error::Error for ParseNoteIdError {}

impl FromStr for NoteId {
    type Err = ParseNoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('#');
        match trimmed.parse::<i64>() {
            Ok(raw) if raw > 0 => Ok(Self(raw)),
            _ => Err(ParseNoteIdError {
                value: s.to_string(),
            }),
        }
    }
}

impl From<NoteId> for i64 {
    fn from(id: NoteId) -> Self {
        id.0
    }
}

impl Serialize for NoteId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        if raw <= 0 {
            return Err(serde::de::Error::custom(format!(
                "invalid note id {raw}: expected a positive integer"
            )));
        }
        Ok(Self(raw))
    }
}
