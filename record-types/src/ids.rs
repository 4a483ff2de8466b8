//! Identity types carried inside record packets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric identifier of a record in a chain's local store.
///
/// On the wire record ids travel as decimal strings. Parsing is strict:
/// ASCII digits only, no sign, no whitespace, must fit in a `u64`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(u64);

impl RecordId {
    /// Create a record id from a raw value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw numeric value.
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Error returned when a string is not a valid record id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid record id: {0:?}")]
pub struct InvalidRecordId(pub String);

impl FromStr for RecordId {
    type Err = InvalidRecordId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // u64::from_str accepts a leading '+', the wire format does not.
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidRecordId(s.to_string()));
        }
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| InvalidRecordId(s.to_string()))
    }
}
