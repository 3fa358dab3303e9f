//! The route search engine.
//!
//! An [`Engine`] owns the aggregated schedule table and the timetable. Both
//! are built once and never modified, so a single engine can serve any
//! number of concurrent searches without locking. Reloading data means
//! building a new engine.

use tracing::{debug, info};

use crate::domain::{RouteMatch, RouteQuery, StationCode};
use crate::sources::{BatchReport, RawRecord, SourceBatch, SourceError, SourceProvider};

use super::aggregate::ScheduleTable;
use super::calendar::{parse_query_date, running_on};
use super::config::EngineConfig;
use super::dedup::deduplicate;
use super::matcher::match_routes;
use super::assemble::assemble;
use super::timetable::{Timetable, TimetableReport};

/// Error from a single search. Never affects other searches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Query date is not a valid `YYYY-MM-DD` calendar date
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Query station is blank
    #[error("invalid {0} station: must not be empty")]
    InvalidStation(&'static str),
}

/// Validate raw query input.
pub fn parse_query(origin: &str, destination: &str, date: &str) -> Result<RouteQuery, SearchError> {
    let origin = StationCode::parse(origin).map_err(|_| SearchError::InvalidStation("origin"))?;
    let destination =
        StationCode::parse(destination).map_err(|_| SearchError::InvalidStation("destination"))?;
    let date = parse_query_date(date)?;
    Ok(RouteQuery::new(origin, destination, date))
}

/// Matches for one query, best first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub query: RouteQuery,
    pub matches: Vec<RouteMatch>,
}

impl SearchResult {
    /// No trains answer the query. This is a normal outcome, not an error.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// User-facing message for an empty result.
    pub fn no_trains_message(&self) -> String {
        format!(
            "No trains found from {} to {} on {}",
            self.query.origin,
            self.query.destination,
            self.query.date.format("%Y-%m-%d")
        )
    }
}

/// What happened while building an engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Per-source normalization counts, highest priority first.
    pub sources: Vec<BatchReport>,
    /// Rows in the aggregated schedule table.
    pub schedule_records: usize,
    pub timetable: TimetableReport,
}

impl LoadReport {
    /// Schedule rows dropped across all sources.
    pub fn dropped(&self) -> usize {
        self.sources.iter().map(|s| s.dropped()).sum()
    }
}

/// Immutable, shareable route search engine.
#[derive(Debug)]
pub struct Engine {
    table: ScheduleTable,
    timetable: Timetable,
    report: LoadReport,
}

impl Engine {
    /// Build an engine from raw source data.
    ///
    /// Invalid rows are dropped and counted. Fails if a batch belongs to an
    /// unregistered source or each configured source does not have exactly
    /// one batch.
    pub fn build(
        config: &EngineConfig,
        batches: Vec<SourceBatch>,
        timetable: Vec<RawRecord>,
    ) -> Result<Self, SourceError> {
        for id in config.normalizers.source_ids() {
            match batches.iter().filter(|b| &b.source_id == id).count() {
                0 => return Err(SourceError::MissingSource(id.to_string())),
                1 => {}
                _ => return Err(SourceError::DuplicateSource(id.to_string())),
            }
        }

        let normalized = batches
            .iter()
            .map(|b| config.normalizers.normalize_batch(b))
            .collect::<Result<Vec<_>, _>>()?;

        let mut reports: Vec<(usize, BatchReport)> = normalized
            .iter()
            .map(|b| (b.priority, b.report.clone()))
            .collect();
        reports.sort_by_key(|(priority, _)| *priority);
        let sources = reports.into_iter().map(|(_, r)| r).collect();

        let table = ScheduleTable::aggregate(normalized);
        let (timetable, timetable_report) = Timetable::build(&config.timetable, &timetable);

        let report = LoadReport {
            sources,
            schedule_records: table.len(),
            timetable: timetable_report,
        };

        info!(
            schedule_records = report.schedule_records,
            dropped = report.dropped(),
            timetable_entries = report.timetable.accepted,
            "built schedule table"
        );

        Ok(Self {
            table,
            timetable,
            report,
        })
    }

    /// Load all sources through `provider` and build an engine.
    pub async fn load<P: SourceProvider>(
        provider: &P,
        config: &EngineConfig,
    ) -> Result<Self, SourceError> {
        let (batches, timetable) =
            futures::try_join!(provider.load_sources(), provider.load_timetable())?;
        Self::build(config, batches, timetable)
    }

    /// Search from raw query strings.
    pub fn search(
        &self,
        origin: &str,
        destination: &str,
        date: &str,
    ) -> Result<SearchResult, SearchError> {
        let query = parse_query(origin, destination, date)?;
        Ok(self.search_query(&query))
    }

    /// Search with a validated query.
    ///
    /// Filters by weekday, matches stations, then deduplicates. Dedup runs
    /// last so a train whose only running record comes from a lower-priority
    /// source is still found.
    pub fn search_query(&self, query: &RouteQuery) -> SearchResult {
        let running = running_on(self.table.records(), query.date);
        let candidates = match_routes(running, &query.origin, &query.destination);
        let matched = candidates.len();
        let unique = deduplicate(candidates);
        let matches = assemble(unique, &self.timetable);

        debug!(
            origin = %query.origin,
            destination = %query.destination,
            date = %query.date,
            matched,
            returned = matches.len(),
            "route search"
        );

        SearchResult {
            query: query.clone(),
            matches,
        }
    }

    pub fn table(&self) -> &ScheduleTable {
        &self.table
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }
}
