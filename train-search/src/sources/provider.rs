//! Source provider abstraction.
//!
//! The engine never does I/O itself. A [`SourceProvider`] hands it every
//! configured schedule source plus the timetable as raw rows; the engine
//! normalizes and indexes them.

use std::future::Future;

use crate::domain::SourceId;

use super::error::SourceError;
use super::raw::RawRecord;

/// All raw rows from one schedule source.
#[derive(Debug, Clone)]
pub struct SourceBatch {
    pub source_id: SourceId,
    pub records: Vec<RawRecord>,
}

impl SourceBatch {
    pub fn new(source_id: impl AsRef<str>, records: Vec<RawRecord>) -> Self {
        Self {
            source_id: SourceId::new(source_id),
            records,
        }
    }
}

/// Supplies raw schedule and timetable rows.
///
/// This abstraction allows the engine to be built from files, HTTP, or
/// in-memory test data.
pub trait SourceProvider: Send + Sync {
    /// Load every configured schedule source.
    ///
    /// Fails if any source cannot be read at all.
    fn load_sources(&self) -> impl Future<Output = Result<Vec<SourceBatch>, SourceError>> + Send;

    /// Load the timetable rows.
    fn load_timetable(&self) -> impl Future<Output = Result<Vec<RawRecord>, SourceError>> + Send;
}

/// Provider serving fixed in-memory data.
#[derive(Debug, Clone, Default)]
pub struct StaticSourceProvider {
    batches: Vec<SourceBatch>,
    timetable: Vec<RawRecord>,
}

impl StaticSourceProvider {
    pub fn new(batches: Vec<SourceBatch>, timetable: Vec<RawRecord>) -> Self {
        Self { batches, timetable }
    }

    /// Add a source batch after the existing ones.
    pub fn with_batch(mut self, batch: SourceBatch) -> Self {
        self.batches.push(batch);
        self
    }

    /// Replace the timetable rows.
    pub fn with_timetable(mut self, timetable: Vec<RawRecord>) -> Self {
        self.timetable = timetable;
        self
    }
}

impl SourceProvider for StaticSourceProvider {
    async fn load_sources(&self) -> Result<Vec<SourceBatch>, SourceError> {
        Ok(self.batches.clone())
    }

    async fn load_timetable(&self) -> Result<Vec<RawRecord>, SourceError> {
        Ok(self.timetable.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_provider_returns_its_data() {
        let row: RawRecord = [("trainNumber", "101")].into_iter().collect();
        let provider = StaticSourceProvider::default()
            .with_batch(SourceBatch::new("schedules", vec![row.clone()]))
            .with_batch(SourceBatch::new("cleartrip", vec![]))
            .with_timetable(vec![row.clone()]);

        let batches = provider.load_sources().await.unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].source_id.as_str(), "schedules");
        assert_eq!(batches[0].records, vec![row.clone()]);
        assert_eq!(provider.load_timetable().await.unwrap(), vec![row]);
    }
}
