//! Canonical schedule and timetable records.

use std::fmt;
use std::sync::Arc;

use super::{ClockTime, ServiceCalendar, StationCode, TrainNumber};

/// Identifier of a configured schedule source (e.g. `"schedules"`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(Arc<str>);

impl SourceId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceId({})", self.0)
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a schedule record came from.
///
/// `priority` is the source's position in the configured source order
/// (0 is the primary schedule). `sequence` is the record's position in the
/// aggregated table and is assigned by the aggregator; a lower sequence
/// always means a higher-priority occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Provenance {
    pub source: SourceId,
    pub priority: usize,
    pub sequence: usize,
}

impl Provenance {
    /// Provenance for a freshly normalized record, before aggregation.
    pub fn new(source: SourceId, priority: usize) -> Self {
        Self {
            source,
            priority,
            sequence: 0,
        }
    }

    /// Whether this came from the highest-priority source.
    pub fn is_primary(&self) -> bool {
        self.priority == 0
    }
}

/// A schedule row after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRecord {
    pub train_number: TrainNumber,
    pub source_station: StationCode,
    pub destination_station: StationCode,
    pub service_calendar: ServiceCalendar,
    pub provenance: Provenance,
}

/// Official timetable entry for a train.
///
/// Times that are absent or unparsable in the source are `None`; they are
/// advisory and never cause a record to be rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableRecord {
    pub train_number: TrainNumber,
    pub departure_time: Option<ClockTime>,
    pub arrival_time: Option<ClockTime>,
}
