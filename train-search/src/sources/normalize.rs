//! Normalization of raw source rows into canonical records.
//!
//! Each schedule source gets its own [`RecordNormalizer`], looked up by
//! source id in a [`NormalizerRegistry`]. The registry's order is the source
//! priority order used later for deduplication.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::domain::{
    ClockTime, Provenance, RecordError, ScheduleRecord, ServiceCalendar, SourceId, StationCode,
    TimetableRecord, TrainNumber, WEEKDAYS,
};

use super::error::SourceError;
use super::provider::SourceBatch;
use super::raw::RawRecord;
use super::schema::{MissingCalendar, SourceSchema, TimetableSchema};

/// Strategy for turning one source's rows into canonical schedule records.
pub trait RecordNormalizer: Send + Sync {
    /// The source this normalizer handles.
    fn source_id(&self) -> &SourceId;

    /// Normalize a single row.
    fn normalize(
        &self,
        raw: &RawRecord,
        provenance: Provenance,
    ) -> Result<ScheduleRecord, RecordError>;
}

/// Normalizer driven by a declarative [`SourceSchema`].
#[derive(Debug, Clone)]
pub struct SchemaNormalizer {
    id: SourceId,
    schema: SourceSchema,
}

impl SchemaNormalizer {
    pub fn new(schema: SourceSchema) -> Self {
        Self {
            id: SourceId::new(&schema.id),
            schema,
        }
    }

    pub fn schema(&self) -> &SourceSchema {
        &self.schema
    }

    fn required<'a>(&self, raw: &'a RawRecord, aliases: &[String]) -> Result<&'a str, RecordError> {
        raw.first_of(aliases)
            .map(|(_, value)| value)
            .ok_or_else(|| RecordError::missing(aliases.join("|")))
    }

    fn calendar(&self, raw: &RawRecord) -> Result<ServiceCalendar, RecordError> {
        let mut flags = [false; 7];

        for (slot, day) in flags.iter_mut().zip(WEEKDAYS) {
            let column = self.schema.day_columns.get(day);
            *slot = match raw.get(column) {
                Some(value) if value.eq_ignore_ascii_case(self.schema.runs_marker.trim()) => true,
                Some(value) if value.eq_ignore_ascii_case(self.schema.not_runs_marker.trim()) => {
                    false
                }
                Some(value) => {
                    return Err(RecordError::InvalidCalendar {
                        column: column.to_string(),
                        value: value.to_string(),
                    });
                }
                None => match self.schema.missing_calendar {
                    MissingCalendar::RunsDaily => true,
                    MissingCalendar::Reject => return Err(RecordError::missing(column)),
                },
            };
        }

        Ok(ServiceCalendar::new(flags))
    }
}

impl RecordNormalizer for SchemaNormalizer {
    fn source_id(&self) -> &SourceId {
        &self.id
    }

    fn normalize(
        &self,
        raw: &RawRecord,
        provenance: Provenance,
    ) -> Result<ScheduleRecord, RecordError> {
        let schema = &self.schema;

        let train_number = TrainNumber::parse(self.required(raw, &schema.train_number)?)
            .map_err(|_| RecordError::missing(schema.train_number.join("|")))?;
        let source_station = StationCode::parse(self.required(raw, &schema.source_station)?)
            .map_err(|_| RecordError::missing(schema.source_station.join("|")))?;
        let destination_station =
            StationCode::parse(self.required(raw, &schema.destination_station)?)
                .map_err(|_| RecordError::missing(schema.destination_station.join("|")))?;
        let service_calendar = self.calendar(raw)?;

        Ok(ScheduleRecord {
            train_number,
            source_station,
            destination_station,
            service_calendar,
            provenance,
        })
    }
}

/// Outcome counts for normalizing one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub source: String,
    pub accepted: usize,
    pub malformed: usize,
    pub invalid_calendar: usize,
}

impl BatchReport {
    pub fn dropped(&self) -> usize {
        self.malformed + self.invalid_calendar
    }

    fn record_error(&mut self, err: &RecordError) {
        match err {
            RecordError::MalformedRecord { .. } => self.malformed += 1,
            RecordError::InvalidCalendar { .. } => self.invalid_calendar += 1,
        }
    }
}

/// Records from one source after normalization.
#[derive(Debug, Clone)]
pub struct NormalizedBatch {
    pub priority: usize,
    pub records: Vec<ScheduleRecord>,
    pub report: BatchReport,
}

/// Ordered set of normalizers, highest priority first.
#[derive(Default)]
pub struct NormalizerRegistry {
    normalizers: Vec<Box<dyn RecordNormalizer>>,
    by_id: HashMap<SourceId, usize>,
}

impl NormalizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry of schema normalizers in the given priority order.
    pub fn from_schemas(schemas: impl IntoIterator<Item = SourceSchema>) -> Self {
        let mut registry = Self::new();
        for schema in schemas {
            registry.register(Box::new(SchemaNormalizer::new(schema)));
        }
        registry
    }

    /// Append a normalizer at the next-lowest priority.
    ///
    /// Registering an id twice replaces the earlier normalizer but keeps its
    /// priority.
    pub fn register(&mut self, normalizer: Box<dyn RecordNormalizer>) {
        let id = normalizer.source_id().clone();
        match self.by_id.get(&id) {
            Some(&idx) => self.normalizers[idx] = normalizer,
            None => {
                self.by_id.insert(id, self.normalizers.len());
                self.normalizers.push(normalizer);
            }
        }
    }

    /// Priority of a source (0 is highest).
    pub fn priority(&self, id: &SourceId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Registered source ids, highest priority first.
    pub fn source_ids(&self) -> impl Iterator<Item = &SourceId> {
        self.normalizers.iter().map(|n| n.source_id())
    }

    pub fn len(&self) -> usize {
        self.normalizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalizers.is_empty()
    }

    /// Normalize a batch with the normalizer registered for its source.
    ///
    /// Rows that fail normalization are dropped and counted; only an unknown
    /// source fails the batch.
    pub fn normalize_batch(&self, batch: &SourceBatch) -> Result<NormalizedBatch, SourceError> {
        let priority = self
            .priority(&batch.source_id)
            .ok_or_else(|| SourceError::UnknownSource(batch.source_id.to_string()))?;
        let normalizer = &self.normalizers[priority];

        let mut report = BatchReport {
            source: batch.source_id.to_string(),
            ..BatchReport::default()
        };
        let mut records = Vec::with_capacity(batch.records.len());

        for (row, raw) in batch.records.iter().enumerate() {
            let provenance = Provenance::new(batch.source_id.clone(), priority);
            match normalizer.normalize(raw, provenance) {
                Ok(record) => records.push(record),
                Err(e) => {
                    debug!(source = %batch.source_id, row, error = %e, "dropping schedule row");
                    report.record_error(&e);
                }
            }
        }
        report.accepted = records.len();

        if report.dropped() > 0 {
            warn!(
                source = %batch.source_id,
                accepted = report.accepted,
                malformed = report.malformed,
                invalid_calendar = report.invalid_calendar,
                "dropped invalid schedule rows"
            );
        }

        Ok(NormalizedBatch {
            priority,
            records,
            report,
        })
    }
}

/// Normalize one timetable row.
///
/// Only the train number is required. Times that fail to parse become
/// `None` so the result shows them as unavailable.
pub fn normalize_timetable(
    schema: &TimetableSchema,
    raw: &RawRecord,
) -> Result<TimetableRecord, RecordError> {
    let (_, number) = raw
        .first_of(&schema.train_number)
        .ok_or_else(|| RecordError::missing(schema.train_number.join("|")))?;
    let train_number =
        TrainNumber::parse(number).map_err(|_| RecordError::missing(schema.train_number.join("|")))?;

    let time = |aliases: &[String]| {
        let (column, value) = raw.first_of(aliases)?;
        match ClockTime::parse(value) {
            Ok(t) => Some(t),
            Err(e) => {
                trace!(train = %train_number, column, value, error = %e, "unparsable timetable time");
                None
            }
        }
    };

    Ok(TimetableRecord {
        departure_time: time(&schema.departure_time),
        arrival_time: time(&schema.arrival_time),
        train_number,
    })
}
