//! Opaque privilege label attached to a share grant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A privilege label such as `read` or `edit`.
///
/// The label is carried through the store untouched. Giving it meaning is
/// the caller's business; the only rule enforced here is that it is not
/// blank.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Privilege(String);

/// Error returned when parsing a blank privilege label.
#[derive(Debug, Clone)]
pub struct ParsePrivilegeError;

impl fmt::Display for ParsePrivilegeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "privilege label cannot be empty")
    }
}

impl std::error::Error for ParsePrivilegeError {}

impl Privilege {
    /// Creates a privilege label, trimming surrounding whitespace.
    pub fn new(s: &str) -> Result<Self, ParsePrivilegeError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParsePrivilegeError);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Privilege(\"{}\")", self.0)
    }
}

impl FromStr for Privilege {
    type Err = ParsePrivilegeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Privilege {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Privilege {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
