//! Validated username type identifying note owners and grantees.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest accepted username, in characters.
pub const MAX_USERNAME_LEN: usize = 64;

/// A username as known to the user directory.
///
/// Usernames are case-sensitive identities (`BIGCAT` and `bigcat` are two
/// different users).
///
/// # Validation Rules
/// - Non-empty after trimming surrounding whitespace
/// - At most [`MAX_USERNAME_LEN`] characters
/// - No interior whitespace or control characters
///
/// # Examples
///
/// ```
/// use noteshare::domain::Username;
///
/// let user = Username::new("  mydog7 ").unwrap();
/// assert_eq!(user.as_str(), "mydog7");
/// assert!(Username::new("two words").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

/// Error returned when parsing an invalid username.
#[derive(Debug, Clone)]
pub struct ParseUsernameError(String);

impl fmt::Display for ParseUsernameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseUsernameError {}

impl Username {
    /// Creates a new Username from a string.
    ///
    /// # Errors
    ///
    /// Returns `ParseUsernameError` if:
    /// - The name is empty or whitespace-only
    /// - The name is longer than [`MAX_USERNAME_LEN`] characters
    /// - The name contains whitespace or control characters
    pub fn new(s: &str) -> Result<Self, ParseUsernameError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ParseUsernameError("username cannot be empty".to_string()));
        }

        if trimmed.chars().count() > MAX_USERNAME_LEN {
            return Err(ParseUsernameError(format!(
                "username is longer than {MAX_USERNAME_LEN} characters"
            )));
        }

        if trimmed
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(ParseUsernameError(format!(
                "invalid username '{}': whitespace and control characters are not allowed",
                trimmed.escape_debug()
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the username as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Username(\"{}\")", self.0)
    }
}

impl FromStr for Username {
    type Err = ParseUsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Username {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_trims_whitespace() {
        let user = Username::new("  alice\t").unwrap();
        assert_eq!(user.as_str(), "alice");
    }

    #[test]
    fn new_preserves_case() {
        let upper = Username::new("BIGCAT").unwrap();
        let lower = Username::new("bigcat").unwrap();
        assert_ne!(upper, lower);
    }

    #[test]
    fn new_rejects_empty() {
        assert!(Username::new("").is_err());
        assert!(Username::new("   ").is_err());
    }

    #[test]
    fn new_rejects_interior_whitespace() {
        let err = Username::new("big cat").unwrap_err();
        assert!(err.to_string().contains("whitespace"));
    }

    #[test]
    fn new_rejects_control_characters() {
        assert!(Username::new("bad\u{7}name").is_err());
    }

    #[test]
    fn new_enforces_length_limit() {
        let at_limit = "a".repeat(MAX_USERNAME_LEN);
        assert!(Username::new(&at_limit).is_ok());

        let over_limit = "a".repeat(MAX_USERNAME_LEN + 1);
        assert!(Username::new(&over_limit).is_err());
    }

    #[test]
    fn allows_punctuation() {
        assert!(Username::new("j.doe@example.com").is_ok());
    }

    #[test]
    fn deserialize_validates() {
        let parsed: Username = serde_json::from_str("\"mydog7\"").unwrap();
        assert_eq!(parsed.as_str(), "mydog7");
        assert!(serde_json::from_str::<Username>("\"\"").is_err());
    }
}
