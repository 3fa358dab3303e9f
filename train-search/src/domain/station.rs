//! Station code types.

use std::fmt;

/// Error returned when a station code is empty after normalization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStation {
    reason: &'static str,
}

/// A normalized station code.
///
/// Schedule sources disagree on casing and padding (`" ndls"`, `"NDLS "`),
/// so codes are trimmed and upper-cased on the way in. Two codes compare
/// equal exactly when their normalized forms do, which makes every station
/// comparison in the engine case-insensitive.
///
/// # Examples
///
/// ```
/// use train_search::domain::StationCode;
///
/// let ndls = StationCode::parse(" ndls ").unwrap();
/// assert_eq!(ndls.as_str(), "NDLS");
/// assert_eq!(ndls, StationCode::parse("NDLS").unwrap());
///
/// // Blank input is rejected
/// assert!(StationCode::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode(String);

impl StationCode {
    /// Normalize and validate a station code.
    pub fn parse(s: &str) -> Result<Self, InvalidStation> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidStation {
                reason: "must not be empty",
            });
        }
        Ok(StationCode(trimmed.to_uppercase()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
