//! Per-source field mappings.
//!
//! Each schedule source names its columns differently. A [`SourceSchema`]
//! tells the normalizer which columns hold the train number, stations and
//! weekday flags, and how the flags are spelled. Schemas are static
//! configuration: they come from built-in presets or the JSON config file.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// What to do when a record has no value for a weekday column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingCalendar {
    /// Drop the record as malformed.
    #[default]
    Reject,
    /// Treat the missing day as a running day.
    RunsDaily,
}

/// Column names for the seven weekday flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayColumns {
    pub mon: String,
    pub tue: String,
    pub wed: String,
    pub thu: String,
    pub fri: String,
    pub sat: String,
    pub sun: String,
}

impl DayColumns {
    /// Column holding the flag for `day`.
    pub fn get(&self, day: Weekday) -> &str {
        match day {
            Weekday::Mon => &self.mon,
            Weekday::Tue => &self.tue,
            Weekday::Wed => &self.wed,
            Weekday::Thu => &self.thu,
            Weekday::Fri => &self.fri,
            Weekday::Sat => &self.sat,
            Weekday::Sun => &self.sun,
        }
    }
}

impl Default for DayColumns {
    fn default() -> Self {
        Self {
            mon: "trainRunsOnMon".to_string(),
            tue: "trainRunsOnTue".to_string(),
            wed: "trainRunsOnWed".to_string(),
            thu: "trainRunsOnThu".to_string(),
            fri: "trainRunsOnFri".to_string(),
            sat: "trainRunsOnSat".to_string(),
            sun: "trainRunsOnSun".to_string(),
        }
    }
}

fn default_runs_marker() -> String {
    "Y".to_string()
}

fn default_not_runs_marker() -> String {
    "N".to_string()
}

/// Field mapping for one schedule source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSchema {
    /// Source identifier, also the key used to pick the normalizer.
    pub id: String,

    /// Aliases for the train number column, tried in order.
    pub train_number: Vec<String>,

    /// Aliases for the origin station column.
    pub source_station: Vec<String>,

    /// Aliases for the terminating station column.
    pub destination_station: Vec<String>,

    #[serde(default)]
    pub day_columns: DayColumns,

    /// Literal meaning "runs on this day".
    #[serde(default = "default_runs_marker")]
    pub runs_marker: String,

    /// Literal meaning "does not run on this day".
    #[serde(default = "default_not_runs_marker")]
    pub not_runs_marker: String,

    #[serde(default)]
    pub missing_calendar: MissingCalendar,
}

impl SourceSchema {
    /// Create a schema with single-name columns and default calendar settings.
    pub fn new(
        id: impl Into<String>,
        train_number: &str,
        source_station: &str,
        destination_station: &str,
    ) -> Self {
        Self {
            id: id.into(),
            train_number: vec![train_number.to_string()],
            source_station: vec![source_station.to_string()],
            destination_station: vec![destination_station.to_string()],
            day_columns: DayColumns::default(),
            runs_marker: default_runs_marker(),
            not_runs_marker: default_not_runs_marker(),
            missing_calendar: MissingCalendar::default(),
        }
    }

    /// Set the missing-calendar policy.
    pub fn with_missing_calendar(mut self, policy: MissingCalendar) -> Self {
        self.missing_calendar = policy;
        self
    }

    /// Set the run/no-run literals.
    pub fn with_markers(mut self, runs: impl Into<String>, not_runs: impl Into<String>) -> Self {
        self.runs_marker = runs.into();
        self.not_runs_marker = not_runs.into();
        self
    }

    /// Layout of the primary `schedules.csv` export.
    pub fn schedules() -> Self {
        Self::new("schedules", "trainNumber", "stationFrom", "stationTo")
    }

    /// Layout of the secondary Cleartrip train list.
    pub fn cleartrip() -> Self {
        let mut schema = Self::new("cleartrip", "trainNumber", "Source", "Destination");
        schema.train_number = vec![
            "trainNumber".to_string(),
            "Train No".to_string(),
            "Train_No".to_string(),
        ];
        schema
    }
}

/// Field mapping for the official timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableSchema {
    pub train_number: Vec<String>,
    pub departure_time: Vec<String>,
    pub arrival_time: Vec<String>,
}

impl Default for TimetableSchema {
    fn default() -> Self {
        Self {
            train_number: vec!["Train_No".to_string(), "trainNumber".to_string()],
            departure_time: vec!["Departure_Time".to_string(), "departureTime".to_string()],
            arrival_time: vec![
                "Arrival_time".to_string(),
                "Arrival_Time".to_string(),
                "arrivalTime".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_columns_default_names() {
        let cols = DayColumns::default();
        assert_eq!(cols.get(Weekday::Mon), "trainRunsOnMon");
        assert_eq!(cols.get(Weekday::Sun), "trainRunsOnSun");
    }

    #[test]
    fn presets() {
        let s = SourceSchema::schedules();
        assert_eq!(s.id, "schedules");
        assert_eq!(s.source_station, vec!["stationFrom"]);
        assert_eq!(s.runs_marker, "Y");
        assert_eq!(s.missing_calendar, MissingCalendar::Reject);

        let c = SourceSchema::cleartrip();
        assert_eq!(c.id, "cleartrip");
        assert_eq!(c.destination_station, vec!["Destination"]);
        assert_eq!(c.train_number.len(), 3);
    }

    #[test]
    fn deserialize_applies_defaults() {
        let json = r#"{
            "id": "legacy",
            "train_number": ["no"],
            "source_station": ["from"],
            "destination_station": ["to"],
            "missing_calendar": "runs_daily"
        }"#;
        let schema: SourceSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.id, "legacy");
        assert_eq!(schema.day_columns, DayColumns::default());
        assert_eq!(schema.not_runs_marker, "N");
        assert_eq!(schema.missing_calendar, MissingCalendar::RunsDaily);
    }

    #[test]
    fn deserialize_timetable_partial() {
        let schema: TimetableSchema =
            serde_json::from_str(r#"{"train_number": ["Number"]}"#).unwrap();
        assert_eq!(schema.train_number, vec!["Number"]);
        assert_eq!(schema.departure_time, TimetableSchema::default().departure_time);
    }
}
