//! Domain types for the train search engine.
//!
//! This module contains the canonical record shapes every schedule source is
//! normalized into, plus the query and result types. All types enforce their
//! invariants at construction time, so code that receives these types can
//! trust their validity.

mod calendar;
mod error;
mod record;
mod route;
mod station;
mod time;
mod train_number;

pub use calendar::{ServiceCalendar, WEEKDAYS};
pub use error::RecordError;
pub use record::{Provenance, ScheduleRecord, SourceId, TimetableRecord};
pub use route::{MatchKind, RouteMatch, RouteQuery};
pub use station::{InvalidStation, StationCode};
pub use time::{ClockTime, TimeError, TravelDuration};
pub use train_number::{InvalidTrainNumber, TrainNumber};
