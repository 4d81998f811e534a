//! Expiry dates in `DD-MMM-YYYY` form, e.g. `01-JAN-2027`.
//!
//! Only the shape is validated: two day digits, an uppercase three-letter
//! month abbreviation, and four year digits separated by hyphens. Day
//! ranges are not checked against the month.

use std::fmt;
use std::str::FromStr;

/// Month abbreviations accepted in the month field.
pub const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Total length of a well-formed date.
const DATE_LEN: usize = 11;

/// A validated expiry date.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpiryDate(String);

impl ExpiryDate {
    /// Parse and validate a `DD-MMM-YYYY` date.
    ///
    /// # Examples
    ///
    /// ```
    /// use pharmacy::types::ExpiryDate;
    /// assert!(ExpiryDate::parse("05-MAY-2027").is_ok());
    /// assert!(ExpiryDate::parse("05-May-2027").is_err());
    /// assert!(ExpiryDate::parse("05-XYZ-2027").is_err());
    /// ```
    pub fn parse(date: &str) -> Result<Self, ExpiryDateError> {
        let bytes = date.as_bytes();
        if bytes.len() != DATE_LEN {
            return Err(ExpiryDateError::WrongLength(date.chars().count()));
        }

        for position in [2, 6] {
            if bytes[position] != b'-' {
                return Err(ExpiryDateError::MissingSeparator { position });
            }
        }
        for position in [0, 1, 7, 8, 9, 10] {
            if !bytes[position].is_ascii_digit() {
                return Err(ExpiryDateError::ExpectedDigit { position });
            }
        }
        for position in 3..6 {
            if !bytes[position].is_ascii_uppercase() {
                return Err(ExpiryDateError::ExpectedUppercase { position });
            }
        }

        // Bytes 3..6 are ASCII uppercase, so this slice is on char boundaries.
        let month = &date[3..6];
        if !MONTHS.contains(&month) {
            return Err(ExpiryDateError::UnknownMonth(month.to_string()));
        }

        Ok(Self(date.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ExpiryDate {
    type Err = ExpiryDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error returned when an expiry date is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryDateError {
    /// The date is not exactly 11 characters long.
    WrongLength(usize),
    /// A `-` was expected at the given byte position.
    MissingSeparator { position: usize },
    /// A digit was expected at the given byte position.
    ExpectedDigit { position: usize },
    /// An uppercase letter was expected at the given byte position.
    ExpectedUppercase { position: usize },
    /// The month abbreviation is not one of `JAN`..`DEC`.
    UnknownMonth(String),
}

impl fmt::Display for ExpiryDateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength(len) => {
                write!(f, "expected {DATE_LEN} characters (DD-MMM-YYYY), got {len}")
            }
            Self::MissingSeparator { position } => {
                write!(f, "expected '-' at position {position}")
            }
            Self::ExpectedDigit { position } => {
                write!(f, "expected a digit at position {position}")
            }
            Self::ExpectedUppercase { position } => {
                write!(f, "expected an uppercase letter at position {position}")
            }
            Self::UnknownMonth(month) => write!(f, "unknown month '{month}'"),
        }
    }
}

impl std::error::Error for ExpiryDateError {}
