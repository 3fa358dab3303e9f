//! Schedule and timetable sources.
//!
//! Sources arrive as untyped CSV-like rows whose column names differ per
//! source. This module maps them onto the canonical domain records, one
//! normalizer per source, and provides the loaders that fetch the raw rows.

mod error;
mod loader;
mod normalize;
mod provider;
mod raw;
mod schema;

pub use error::SourceError;
pub use loader::{CsvProviderConfig, CsvSourceProvider, SourceLocation, parse_csv};
pub use normalize::{
    BatchReport, NormalizedBatch, NormalizerRegistry, RecordNormalizer, SchemaNormalizer,
    normalize_timetable,
};
pub use provider::{SourceBatch, SourceProvider, StaticSourceProvider};
pub use raw::RawRecord;
pub use schema::{DayColumns, MissingCalendar, SourceSchema, TimetableSchema};
