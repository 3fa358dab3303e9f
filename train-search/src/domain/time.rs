//! Clock time handling for timetable data.
//!
//! Timetables provide departure and arrival as "HH:MM" strings with no date
//! component. Journey duration is computed on the 24-hour clock: an arrival
//! that is numerically earlier than the departure is taken to be on the next
//! day. Journeys longer than a day cannot be told apart from shorter ones
//! with this data and are under-reported.

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Minutes in a day.
const MINUTES_PER_DAY: u32 = 24 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A 24-hour wall-clock time with minute precision.
///
/// # Examples
///
/// ```
/// use train_search::domain::ClockTime;
///
/// let t = ClockTime::parse("14:30").unwrap();
/// assert_eq!(t.to_string(), "14:30");
///
/// // Single-digit hours and trailing seconds are accepted
/// assert_eq!(ClockTime::parse("9:05").unwrap().to_string(), "09:05");
/// assert_eq!(ClockTime::parse("09:05:00").unwrap().to_string(), "09:05");
///
/// assert!(ClockTime::parse("1430").is_err());
/// assert!(ClockTime::parse("25:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create a clock time from hour and minute.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(ClockTime)
    }

    /// Parse `H:MM`, `HH:MM` or `HH:MM:SS` (seconds are discarded).
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let s = s.trim();
        let mut parts = s.split(':');

        let hour_part = parts.next().ok_or_else(|| TimeError::new("expected HH:MM format"))?;
        let minute_part = parts
            .next()
            .ok_or_else(|| TimeError::new("expected HH:MM format"))?;
        let second_part = parts.next();
        if parts.next().is_some() {
            return Err(TimeError::new("too many components"));
        }

        if hour_part.is_empty() || hour_part.len() > 2 {
            return Err(TimeError::new("hour must be one or two digits"));
        }
        let hour = parse_digits(hour_part).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        if minute_part.len() != 2 {
            return Err(TimeError::new("minute must be two digits"));
        }
        let minute =
            parse_digits(minute_part).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        if let Some(seconds) = second_part {
            let valid = seconds.len() == 2 && parse_digits(seconds).is_some_and(|s| s <= 59);
            if !valid {
                return Err(TimeError::new("invalid seconds"));
            }
        }

        Self::from_hm(hour, minute).ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes since midnight.
    pub fn minutes_from_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse a run of ASCII digits into a u32.
fn parse_digits(s: &str) -> Option<u32> {
    s.chars().try_fold(0u32, |acc, c| Some(acc * 10 + c.to_digit(10)?))
}

/// Elapsed journey time, always less than 24 hours.
///
/// Displayed as `H:MM` with unpadded hours.
///
/// # Examples
///
/// ```
/// use train_search::domain::{ClockTime, TravelDuration};
///
/// let dep = ClockTime::parse("23:50").unwrap();
/// let arr = ClockTime::parse("00:10").unwrap();
/// assert_eq!(TravelDuration::between(dep, arr).to_string(), "0:20");
///
/// let dep = ClockTime::parse("09:00").unwrap();
/// let arr = ClockTime::parse("11:45").unwrap();
/// assert_eq!(TravelDuration::between(dep, arr).to_string(), "2:45");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TravelDuration {
    minutes: u32,
}

impl TravelDuration {
    /// Duration from `departure` to `arrival`, rolling over midnight at most once.
    pub fn between(departure: ClockTime, arrival: ClockTime) -> Self {
        let dep = departure.minutes_from_midnight();
        let arr = arrival.minutes_from_midnight();
        let minutes = (arr + MINUTES_PER_DAY - dep) % MINUTES_PER_DAY;
        Self { minutes }
    }

    /// Duration from optional raw times; `None` when either side is missing.
    pub fn between_opt(departure: Option<ClockTime>, arrival: Option<ClockTime>) -> Option<Self> {
        Some(Self::between(departure?, arrival?))
    }

    /// Total minutes.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }
}

impl fmt::Display for TravelDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        ClockTime::parse(s).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        let c = t("00:00");
        assert_eq!((c.hour(), c.minute()), (0, 0));

        let c = t("23:59");
        assert_eq!((c.hour(), c.minute()), (23, 59));

        let c = t("7:05");
        assert_eq!((c.hour(), c.minute()), (7, 5));

        let c = t(" 14:30 ");
        assert_eq!((c.hour(), c.minute()), (14, 30));

        let c = t("14:30:59");
        assert_eq!((c.hour(), c.minute()), (14, 30));
    }

    #[test]
    fn reject_invalid_format() {
        assert!(ClockTime::parse("").is_err());
        assert!(ClockTime::parse("1430").is_err());
        assert!(ClockTime::parse("14:3").is_err());
        assert!(ClockTime::parse("14:300").is_err());
        assert!(ClockTime::parse("140:30").is_err());
        assert!(ClockTime::parse(":30").is_err());
        assert!(ClockTime::parse("14:30:00:00").is_err());
        assert!(ClockTime::parse("14:30:7").is_err());
        assert!(ClockTime::parse("N/A").is_err());
        assert!(ClockTime::parse("ab:cd").is_err());
    }

    #[test]
    fn reject_out_of_range() {
        assert!(ClockTime::parse("24:00").is_err());
        assert!(ClockTime::parse("12:60").is_err());
        assert!(ClockTime::parse("12:30:60").is_err());
    }

    #[test]
    fn display_zero_pads() {
        assert_eq!(t("9:05").to_string(), "09:05");
        assert_eq!(format!("{:?}", t("9:05")), "ClockTime(09:05)");
    }

    #[test]
    fn ordering() {
        assert!(t("08:00") < t("08:01"));
        assert!(t("23:59") > t("00:00"));
    }

    #[test]
    fn duration_without_rollover() {
        let d = TravelDuration::between(t("09:00"), t("11:45"));
        assert_eq!(d.minutes(), 165);
        assert_eq!(d.to_string(), "2:45");
    }

    #[test]
    fn duration_with_rollover() {
        let d = TravelDuration::between(t("23:50"), t("00:10"));
        assert_eq!(d.minutes(), 20);
        assert_eq!(d.to_string(), "0:20");
    }

    #[test]
    fn duration_same_time_is_zero() {
        assert_eq!(TravelDuration::between(t("10:00"), t("10:00")).to_string(), "0:00");
    }

    #[test]
    fn duration_pads_minutes_not_hours() {
        assert_eq!(TravelDuration::between(t("06:00"), t("16:05")).to_string(), "10:05");
        assert_eq!(TravelDuration::between(t("06:00"), t("07:00")).to_string(), "1:00");
    }

    #[test]
    fn duration_opt_missing_side() {
        assert!(TravelDuration::between_opt(None, Some(t("10:00"))).is_none());
        assert!(TravelDuration::between_opt(Some(t("10:00")), None).is_none());
        assert_eq!(
            TravelDuration::between_opt(Some(t("10:00")), Some(t("10:30"))),
            Some(TravelDuration::between(t("10:00"), t("10:30")))
        );
    }
}
