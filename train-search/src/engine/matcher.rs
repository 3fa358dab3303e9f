//! Matching schedule records against a station pair.
//!
//! Records carry only their end stations, not the stops in between. A train
//! that terminates at the requested destination but starts somewhere other
//! than the requested origin is reported as an intermediate match, on the
//! assumption that the traveller boards it mid-route. Nothing in the data
//! confirms the train actually calls at the origin; callers should label
//! these results accordingly.

use crate::domain::{MatchKind, ScheduleRecord, StationCode};

/// A schedule record that matched a query, with how it matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub record: &'a ScheduleRecord,
    pub kind: MatchKind,
}

impl<'a> Candidate<'a> {
    /// Aggregation sequence of the underlying record.
    pub fn sequence(&self) -> usize {
        self.record.provenance.sequence
    }
}

/// Classify a single record against the query stations.
pub fn classify(
    record: &ScheduleRecord,
    origin: &StationCode,
    destination: &StationCode,
) -> Option<MatchKind> {
    if &record.destination_station != destination {
        return None;
    }
    if &record.source_station == origin {
        Some(MatchKind::Direct)
    } else {
        Some(MatchKind::Intermediate)
    }
}

/// Direct matches followed by intermediate matches, each in input order.
pub fn match_routes<'a>(
    records: impl IntoIterator<Item = &'a ScheduleRecord>,
    origin: &StationCode,
    destination: &StationCode,
) -> Vec<Candidate<'a>> {
    let mut direct = Vec::new();
    let mut intermediate = Vec::new();

    for record in records {
        match classify(record, origin, destination) {
            Some(kind @ MatchKind::Direct) => direct.push(Candidate { record, kind }),
            Some(kind @ MatchKind::Intermediate) => intermediate.push(Candidate { record, kind }),
            None => {}
        }
    }

    direct.extend(intermediate);
    direct
}
