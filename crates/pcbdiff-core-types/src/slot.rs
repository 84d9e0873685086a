//! Layout slot identifiers
//!
//! A session holds at most two layouts: the Golden Reference ("A") and the
//! Unit Under Test ("B"). The active view is always passed explicitly as a
//! `Slot`; there is no process-wide "current view" state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which of the two compared files a layout belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    /// Golden Reference (File A), the expected layout
    A,
    /// Unit Under Test (File B), the layout being checked
    B,
}

impl Slot {
    /// The other slot
    pub fn other(self) -> Self {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }

    /// Human-readable role name
    pub fn role(self) -> &'static str {
        match self {
            Slot::A => "golden reference",
            Slot::B => "unit under test",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::A => "A",
            Slot::B => "B",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a slot name is not `A` or `B`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSlotError(String);

impl fmt::Display for ParseSlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown slot '{}': expected A or B", self.0)
    }
}

impl std::error::Error for ParseSlotError {}

impl FromStr for Slot {
    type Err = ParseSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Slot::A),
            "B" | "b" => Ok(Slot::B),
            other => Err(ParseSlotError(other.to_string())),
        }
    }
}
