//! Route search engine.
//!
//! This module implements the matching pipeline that answers: "which trains
//! take me from this station to that one on this date?"
//!
//! Sources are normalized and aggregated once into an immutable table. Each
//! search then filters by weekday, matches stations, deduplicates across
//! sources, joins the timetable and orders the results.

mod aggregate;
mod assemble;
mod calendar;
mod config;
mod dedup;
mod matcher;
mod search;
mod timetable;


pub use aggregate::ScheduleTable;
pub use assemble::assemble;
pub use calendar::{parse_query_date, running_on};
pub use config::EngineConfig;
pub use dedup::deduplicate;
pub use matcher::{Candidate, classify, match_routes};
pub use search::{Engine, LoadReport, SearchError, SearchResult, parse_query};
pub use timetable::{Timetable, TimetableReport};
