//! Record-level error types.
//!
//! These errors reject a single source row. They are recovered locally: the
//! row is dropped and loading continues.

/// Why a raw source record could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// A required field is absent or blank
    #[error("malformed record: missing required field '{field}'")]
    MalformedRecord { field: String },

    /// A day-of-week flag holds something other than the run/no-run markers
    #[error("invalid calendar: column '{column}' has unrecognized value '{value}'")]
    InvalidCalendar { column: String, value: String },
}

impl RecordError {
    pub fn missing(field: impl Into<String>) -> Self {
        RecordError::MalformedRecord {
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RecordError::missing("trainNumber");
        assert_eq!(
            err.to_string(),
            "malformed record: missing required field 'trainNumber'"
        );

        let err = RecordError::InvalidCalendar {
            column: "trainRunsOnMon".into(),
            value: "maybe".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid calendar: column 'trainRunsOnMon' has unrecognized value 'maybe'"
        );
    }
}
