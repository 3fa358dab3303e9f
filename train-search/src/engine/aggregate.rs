//! Merging normalized batches into one schedule table.

use crate::domain::ScheduleRecord;
use crate::sources::NormalizedBatch;

/// All schedule records from every source, in priority order.
///
/// Records from the highest-priority source come first and the
/// lowest-priority source is appended last. Each record's
/// `provenance.sequence` equals its index in the table, so comparing
/// sequences compares source priority. Duplicates are kept.
#[derive(Debug, Clone, Default)]
pub struct ScheduleTable {
    records: Vec<ScheduleRecord>,
}

impl ScheduleTable {
    /// Concatenate batches in source priority order.
    ///
    /// Batches sharing a priority keep the order they were given in.
    pub fn aggregate(mut batches: Vec<NormalizedBatch>) -> Self {
        batches.sort_by_key(|b| b.priority);

        let total = batches.iter().map(|b| b.records.len()).sum();
        let mut records = Vec::with_capacity(total);

        for batch in batches {
            for mut record in batch.records {
                record.provenance.sequence = records.len();
                records.push(record);
            }
        }

        Self { records }
    }

    pub fn records(&self) -> &[ScheduleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Provenance, ServiceCalendar, SourceId, StationCode, TrainNumber,
    };
    use crate::sources::BatchReport;

    fn record(train: &str, source: &str, priority: usize) -> ScheduleRecord {
        ScheduleRecord {
            train_number: TrainNumber::parse(train).unwrap(),
            source_station: StationCode::parse("NDLS").unwrap(),
            destination_station: StationCode::parse("BCT").unwrap(),
            service_calendar: ServiceCalendar::daily(),
            provenance: Provenance::new(SourceId::new(source), priority),
        }
    }

    fn batch(priority: usize, source: &str, trains: &[&str]) -> NormalizedBatch {
        NormalizedBatch {
            priority,
            records: trains.iter().map(|t| record(t, source, priority)).collect(),
            report: BatchReport::default(),
        }
    }

    #[test]
    fn orders_by_priority_and_assigns_sequence() {
        let table = ScheduleTable::aggregate(vec![
            batch(1, "cleartrip", &["101", "303"]),
            batch(0, "schedules", &["101", "202"]),
        ]);

        let got: Vec<_> = table
            .records()
            .iter()
            .map(|r| (r.train_number.as_str(), r.provenance.source.as_str(), r.provenance.sequence))
            .collect();
        assert_eq!(
            got,
            vec![
                ("101", "schedules", 0),
                ("202", "schedules", 1),
                ("101", "cleartrip", 2),
                ("303", "cleartrip", 3),
            ]
        );
    }

    #[test]
    fn keeps_duplicates() {
        let table = ScheduleTable::aggregate(vec![batch(0, "a", &["101", "101"])]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn empty() {
        let table = ScheduleTable::aggregate(vec![]);
        assert!(table.is_empty());
    }
}
