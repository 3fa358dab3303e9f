//! Route queries and matches.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

use super::{ClockTime, Provenance, StationCode, TrainNumber, TravelDuration};

/// A validated route query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteQuery {
    pub origin: StationCode,
    pub destination: StationCode,
    pub date: NaiveDate,
}

impl RouteQuery {
    pub fn new(origin: StationCode, destination: StationCode, date: NaiveDate) -> Self {
        Self {
            origin,
            destination,
            date,
        }
    }
}

/// How a schedule record matched the query.
///
/// Ordered so that `Direct < Intermediate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatchKind {
    /// Listed origin and destination both equal the query's.
    Direct,
    /// Only the destination matches. The query origin is assumed to be a stop
    /// along the way; the data has no stop lists to confirm it.
    Intermediate,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Direct => "direct",
            MatchKind::Intermediate => "intermediate",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One train answering a route query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub train_number: TrainNumber,
    pub source_station: StationCode,
    pub destination_station: StationCode,
    pub departure_time: Option<ClockTime>,
    pub arrival_time: Option<ClockTime>,
    pub travel_duration: Option<TravelDuration>,
    pub match_kind: MatchKind,
    pub provenance: Provenance,
}

impl RouteMatch {
    /// Result ordering: direct first, then by departure (missing last), then
    /// by train number.
    pub fn display_order(&self, other: &Self) -> Ordering {
        self.match_kind
            .cmp(&other.match_kind)
            .then_with(|| match (self.departure_time, other.departure_time) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| self.train_number.cmp(&other.train_number))
    }
}
