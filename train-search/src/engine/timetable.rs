//! Timetable lookup by train number.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{TimetableRecord, TrainNumber};
use crate::sources::{RawRecord, TimetableSchema, normalize_timetable};

/// Counts from building the timetable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimetableReport {
    pub accepted: usize,
    pub malformed: usize,
    pub duplicates: usize,
}

/// Departure and arrival times keyed by train number.
///
/// When a train number appears more than once, the first row wins.
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    by_train: HashMap<TrainNumber, TimetableRecord>,
}

impl Timetable {
    pub fn from_records(records: impl IntoIterator<Item = TimetableRecord>) -> (Self, usize) {
        let mut by_train = HashMap::new();
        let mut duplicates = 0;
        for record in records {
            if by_train.contains_key(&record.train_number) {
                duplicates += 1;
                continue;
            }
            by_train.insert(record.train_number.clone(), record);
        }
        (Self { by_train }, duplicates)
    }

    /// Normalize raw timetable rows, dropping rows without a train number.
    pub fn build(schema: &TimetableSchema, raw: &[RawRecord]) -> (Self, TimetableReport) {
        let mut malformed = 0;
        let records: Vec<_> = raw
            .iter()
            .enumerate()
            .filter_map(|(row, r)| match normalize_timetable(schema, r) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!(row, error = %e, "dropping timetable row");
                    malformed += 1;
                    None
                }
            })
            .collect();

        let (timetable, duplicates) = Self::from_records(records);
        let report = TimetableReport {
            accepted: timetable.len(),
            malformed,
            duplicates,
        };
        (timetable, report)
    }

    pub fn get(&self, train: &TrainNumber) -> Option<&TimetableRecord> {
        self.by_train.get(train)
    }

    pub fn len(&self) -> usize {
        self.by_train.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_train.is_empty()
    }
}
