//! Train number type.

use std::fmt;

/// Error returned when a train number is empty after normalization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid train number: {reason}")]
pub struct InvalidTrainNumber {
    reason: &'static str,
}

/// A normalized train number.
///
/// Train numbers are opaque identifiers. Most are numeric (`"12951"`) but some
/// sources carry suffixes (`"02951a"`), so the only normalization is trimming
/// and upper-casing. The same train number may appear in several sources;
/// uniqueness only holds after deduplication.
///
/// # Examples
///
/// ```
/// use train_search::domain::TrainNumber;
///
/// let tn = TrainNumber::parse(" 12951 ").unwrap();
/// assert_eq!(tn.as_str(), "12951");
///
/// assert_eq!(TrainNumber::parse("02951a").unwrap().as_str(), "02951A");
/// assert!(TrainNumber::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrainNumber(String);

impl TrainNumber {
    /// Normalize and validate a train number.
    pub fn parse(s: &str) -> Result<Self, InvalidTrainNumber> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidTrainNumber {
                reason: "must not be empty",
            });
        }
        Ok(TrainNumber(trimmed.to_uppercase()))
    }

    /// Returns the train number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TrainNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainNumber({})", self.0)
    }
}

impl fmt::Display for TrainNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
