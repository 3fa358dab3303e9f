//! Source loading error types.

/// Errors that stop a schedule table from being built.
///
/// Every variant is fatal for the build: dedup priority assumes all
/// configured sources are present, so a partial table is never published.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// A source could not be read at all
    #[error("source '{source_id}' unavailable: {reason}")]
    Unavailable { source_id: String, reason: String },

    /// HTTP client could not be constructed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Source content is not readable CSV
    #[error("CSV error in source '{source_id}': {message}")]
    Csv { source_id: String, message: String },

    /// A batch arrived for a source with no registered normalizer
    #[error("no normalizer registered for source '{0}'")]
    UnknownSource(String),

    /// A configured source produced no batch
    #[error("configured source '{0}' was not loaded")]
    MissingSource(String),

    /// More than one batch arrived for the same source
    #[error("source '{0}' was loaded more than once")]
    DuplicateSource(String),
}

impl SourceError {
    pub fn unavailable(source_id: impl Into<String>, reason: impl ToString) -> Self {
        SourceError::Unavailable {
            source_id: source_id.into(),
            reason: reason.to_string(),
        }
    }
}
