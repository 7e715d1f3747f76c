//! Strongly-typed migration name wrapper.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Width of the zero-padded sequence prefix in a migration name.
///
/// Lexicographic order of names equals numeric order of sequences as long as
/// every sequence fits in this many digits.
pub const SEQUENCE_WIDTH: usize = 4;

/// Largest sequence number that fits in [`SEQUENCE_WIDTH`] digits.
pub const MAX_SEQUENCE: u32 = 9999;

/// Strongly-typed wrapper for migration names (`0001_create_farms_table`).
///
/// The name is the file stem of a migration unit. Ordering is plain string
/// ordering, which is what the runner applies units by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MigrationName(String);

impl MigrationName {
    /// Create a new `MigrationName`, panicking in debug builds if the name is empty.
    ///
    /// Prefer [`try_new`](Self::try_new) when handling untrusted input.
    pub fn new(name: impl Into<String>) -> Self {
        let s = name.into();
        debug_assert!(!s.is_empty(), "MigrationName must not be empty");
        Self(s)
    }

    /// Try to create a new `MigrationName`, returning `None` if the name is empty.
    pub fn try_new(name: impl Into<String>) -> Option<Self> {
        let s = name.into();
        if s.is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// Build a name from a sequence number and an already-sanitized description.
    pub fn compose(sequence: u32, description: &str) -> Self {
        Self(format!(
            "{sequence:0width$}_{description}",
            width = SEQUENCE_WIDTH
        ))
    }

    /// Sequence number parsed from the leading segment, if it is numeric.
    pub fn sequence(&self) -> Option<u32> {
        let (prefix, _) = self.0.split_once('_')?;
        prefix.parse().ok()
    }

    /// Return the underlying name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for MigrationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MigrationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for MigrationName {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MigrationName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for MigrationName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MigrationName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<String> for MigrationName {
    fn eq(&self, other: &String) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[path = "migration_name_test.rs"]
mod tests;
