//! Opaque note identifier as assigned by the source store.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// The stable identifier of a note in the source collection.
///
/// GUIDs are opaque: nothing is assumed about their shape beyond being a
/// non-empty string without path separators, since they are extracted from
/// the path segments of internal link hrefs.
///
/// # Examples
///
/// ```
/// use evermark::domain::NoteGuid;
///
/// let guid: NoteGuid = "c1e7e98a-825f-4eb8-b2df-d869ed082999".parse().unwrap();
/// assert_eq!(guid.as_str(), "c1e7e98a-825f-4eb8-b2df-d869ed082999");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteGuid(String);

/// Error returned when parsing an invalid GUID string.
#[derive(Debug, Clone)]
pub struct ParseNoteGuidError {
    value: String,
    reason: &'static str,
}

impl ParseNoteGuidError {
    /// Returns the invalid value that caused this error.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseNoteGuidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid note guid '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for ParseNoteGuidError {}

impl NoteGuid {
    /// Creates a GUID, validating that it is non-empty and has no `/`.
    pub fn new(s: impl Into<String>) -> Result<Self, ParseNoteGuidError> {
        let value = s.into();
        if value.trim().is_empty() {
            return Err(ParseNoteGuidError {
                value,
                reason: "guid cannot be empty",
            });
        }
        if value.contains('/') {
            return Err(ParseNoteGuidError {
                value,
                reason: "guid cannot contain '/'",
            });
        }
        Ok(Self(value))
    }

    /// Returns the GUID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NoteGuid {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for NoteGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteGuid(\"{}\")", self.0)
    }
}

impl FromStr for NoteGuid {
    type Err = ParseNoteGuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for NoteGuid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NoteGuid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
