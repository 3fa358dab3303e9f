//! Weekday filtering of the schedule table.

use chrono::{Datelike, NaiveDate};

use crate::domain::ScheduleRecord;

use super::search::SearchError;

/// Parse an ISO `YYYY-MM-DD` query date.
pub fn parse_query_date(s: &str) -> Result<NaiveDate, SearchError> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| SearchError::InvalidDate(trimmed.to_string()))
}

/// Records that run on `date`'s weekday, in table order.
pub fn running_on<'a>(
    records: &'a [ScheduleRecord],
    date: NaiveDate,
) -> impl Iterator<Item = &'a ScheduleRecord> + 'a {
    let weekday = date.weekday();
    records
        .iter()
        .filter(move |r| r.service_calendar.runs_on(weekday))
}
