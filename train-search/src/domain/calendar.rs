//! Weekly service calendars.

use chrono::Weekday;
use std::fmt;

/// All weekdays, Monday first, in calendar-array order.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Which weekdays a scheduled train runs on.
///
/// Always holds exactly seven flags; a calendar with a missing day cannot be
/// constructed.
///
/// # Examples
///
/// ```
/// use chrono::Weekday;
/// use train_search::domain::ServiceCalendar;
///
/// let cal = ServiceCalendar::from_days(&[Weekday::Mon, Weekday::Wed, Weekday::Fri]);
/// assert!(cal.runs_on(Weekday::Mon));
/// assert!(!cal.runs_on(Weekday::Tue));
/// assert_eq!(cal.to_string(), "Mon,Wed,Fri");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceCalendar([bool; 7]);

impl ServiceCalendar {
    /// Build from flags in Monday..Sunday order.
    pub fn new(flags: [bool; 7]) -> Self {
        Self(flags)
    }

    /// A calendar running every day.
    pub fn daily() -> Self {
        Self([true; 7])
    }

    /// A calendar running on the given days only.
    pub fn from_days(days: &[Weekday]) -> Self {
        let mut flags = [false; 7];
        for day in days {
            flags[day.num_days_from_monday() as usize] = true;
        }
        Self(flags)
    }

    /// Whether the train runs on `day`.
    pub fn runs_on(&self, day: Weekday) -> bool {
        self.0[day.num_days_from_monday() as usize]
    }

    /// Flags in Monday..Sunday order.
    pub fn flags(&self) -> [bool; 7] {
        self.0
    }

    /// Days the train runs on, Monday first.
    pub fn running_days(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEKDAYS.into_iter().filter(|d| self.runs_on(*d))
    }
}

impl fmt::Debug for ServiceCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceCalendar({})", self)
    }
}

impl fmt::Display for ServiceCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days: Vec<String> = self.running_days().map(|d| d.to_string()).collect();
        if days.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&days.join(","))
        }
    }
}
