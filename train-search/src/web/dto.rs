//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::RouteMatch;
use crate::engine::SearchResult;

/// Placeholder for times and durations the timetable does not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Request to search for trains.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    /// Origin station code
    pub source: String,

    /// Destination station code
    pub destination: String,

    /// Travel date, YYYY-MM-DD
    pub date: String,
}

/// Response to a train search.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub trains: Vec<TrainResult>,

    /// Set when no trains were found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchResponse {
    pub fn from_result(result: &SearchResult) -> Self {
        let message = result.is_empty().then(|| result.no_trains_message());
        Self {
            trains: result.matches.iter().map(TrainResult::from_match).collect(),
            message,
        }
    }
}

/// A train in search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainResult {
    pub train_number: String,

    /// Station the train starts from
    pub source_station: String,

    /// Station the train terminates at
    pub destination_station: String,

    /// Departure time (HH:MM) or "N/A"
    pub departure_time: String,

    /// Arrival time (HH:MM) or "N/A"
    pub arrival_time: String,

    /// Travel time (H:MM) or "N/A"
    pub travel_duration: String,

    /// "direct" or "intermediate"
    pub match_kind: &'static str,

    /// Source the record came from
    pub source: String,
}

impl TrainResult {
    pub fn from_match(m: &RouteMatch) -> Self {
        Self {
            train_number: m.train_number.to_string(),
            source_station: m.source_station.to_string(),
            destination_station: m.destination_station.to_string(),
            departure_time: or_not_available(m.departure_time),
            arrival_time: or_not_available(m.arrival_time),
            travel_duration: or_not_available(m.travel_duration),
            match_kind: m.match_kind.as_str(),
            source: m.provenance.source.to_string(),
        }
    }
}

fn or_not_available<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
