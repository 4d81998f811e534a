//! Batch identifier, the key of the inventory.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// A unique identifier for a medicine batch, e.g. `B101`.
///
/// Ordered by byte-wise lexicographic comparison, so `"B10"` sorts before
/// `"B2"`.
///
/// # Invariants
///
/// - The ID is never empty.
/// - The ID has no leading or trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BatchId(String);

impl BatchId {
    /// Create a batch ID from user-supplied text, trimming surrounding
    /// whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use pharmacy::types::BatchId;
    /// let id = BatchId::new("  B202 ").expect("non-empty");
    /// assert_eq!(id.as_str(), "B202");
    /// assert!(BatchId::new("   ").is_err());
    /// ```
    pub fn new(id: &str) -> Result<Self, BatchIdError> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(BatchIdError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Create the synthetic ID `B{number}` used by generated datasets.
    ///
    /// ```
    /// use pharmacy::types::BatchId;
    /// assert_eq!(BatchId::numbered(42).as_str(), "B42");
    /// ```
    #[must_use]
    pub fn numbered(number: usize) -> Self {
        Self(format!("B{number}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for BatchId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for BatchId {
    type Err = BatchIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Error returned when a batch ID is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchIdError {
    /// The ID was empty or only whitespace.
    Empty,
}

impl fmt::Display for BatchIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "batch ID must not be empty"),
        }
    }
}

impl std::error::Error for BatchIdError {}
