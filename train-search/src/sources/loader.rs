//! CSV source provider.
//!
//! Reads schedule and timetable exports from disk or over HTTP and turns
//! each CSV row into a [`RawRecord`] keyed by header name.

use std::path::PathBuf;
use std::time::Duration;

use futures::future::try_join_all;
use tracing::{info, warn};

use super::error::SourceError;
use super::provider::{SourceBatch, SourceProvider};
use super::raw::RawRecord;

/// Source id used in errors about the timetable.
const TIMETABLE_ID: &str = "timetable";

/// Where a CSV file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Path(PathBuf),
    Url(String),
}

impl SourceLocation {
    /// Interpret `http://` and `https://` strings as URLs, anything else as a path.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            SourceLocation::Url(s.to_string())
        } else {
            SourceLocation::Path(PathBuf::from(s))
        }
    }
}

/// Configuration for the CSV provider.
#[derive(Debug, Clone)]
pub struct CsvProviderConfig {
    /// Schedule sources as (source id, location), highest priority first.
    pub sources: Vec<(String, SourceLocation)>,
    /// Timetable location.
    pub timetable: SourceLocation,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl CsvProviderConfig {
    pub fn new(timetable: SourceLocation) -> Self {
        Self {
            sources: Vec::new(),
            timetable,
            timeout_secs: 30,
        }
    }

    /// Add a schedule source at the next-lowest priority.
    pub fn with_source(mut self, id: impl Into<String>, location: SourceLocation) -> Self {
        self.sources.push((id.into(), location));
        self
    }
}

/// Provider that reads CSV files from paths or URLs.
#[derive(Debug, Clone)]
pub struct CsvSourceProvider {
    http: reqwest::Client,
    config: CsvProviderConfig,
}

impl CsvSourceProvider {
    pub fn new(config: CsvProviderConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    async fn fetch(&self, id: &str, location: &SourceLocation) -> Result<Vec<RawRecord>, SourceError> {
        let bytes = match location {
            SourceLocation::Path(path) => tokio::fs::read(path)
                .await
                .map_err(|e| SourceError::unavailable(id, format!("{}: {}", path.display(), e)))?,
            SourceLocation::Url(url) => {
                let response = self
                    .http
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| SourceError::unavailable(id, e))?;
                let status = response.status();
                if !status.is_success() {
                    return Err(SourceError::unavailable(id, format!("{url} returned {status}")));
                }
                response
                    .bytes()
                    .await
                    .map_err(|e| SourceError::unavailable(id, e))?
                    .to_vec()
            }
        };

        let records = parse_csv(id, &bytes)?;
        info!(source = id, rows = records.len(), "loaded source");
        Ok(records)
    }
}

impl SourceProvider for CsvSourceProvider {
    async fn load_sources(&self) -> Result<Vec<SourceBatch>, SourceError> {
        let loads = self.config.sources.iter().map(|(id, location)| async move {
            let records = self.fetch(id, location).await?;
            Ok::<_, SourceError>(SourceBatch::new(id, records))
        });
        try_join_all(loads).await
    }

    async fn load_timetable(&self) -> Result<Vec<RawRecord>, SourceError> {
        self.fetch(TIMETABLE_ID, &self.config.timetable).await
    }
}

/// Parse CSV bytes with a header row into raw records.
///
/// Cells are trimmed and short rows are allowed. A row that cannot be decoded
/// is skipped; an unreadable header fails the whole source.
pub fn parse_csv(source_id: &str, bytes: &[u8]) -> Result<Vec<RawRecord>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| SourceError::Csv {
            source_id: source_id.to_string(),
            message: e.to_string(),
        })?
        .clone();

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        match result {
            Ok(record) => records.push(headers.iter().zip(record.iter()).collect()),
            Err(e) => warn!(source = source_id, row, error = %e, "skipping unreadable CSV row"),
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SCHEDULES: &str = "\
trainNumber,stationFrom,stationTo,trainRunsOnMon,trainRunsOnTue,trainRunsOnWed,trainRunsOnThu,trainRunsOnFri,trainRunsOnSat,trainRunsOnSun
101 , NDLS,BCT,Y,N,Y,N,Y,N,N
202,MAS,SBC,Y,Y,Y,Y,Y,Y,Y
";

    #[test]
    fn location_parse() {
        assert_eq!(
            SourceLocation::parse("https://example.org/a.csv"),
            SourceLocation::Url("https://example.org/a.csv".to_string())
        );
        assert_eq!(
            SourceLocation::parse(" data/schedules.csv "),
            SourceLocation::Path(PathBuf::from("data/schedules.csv"))
        );
    }

    #[test]
    fn parse_csv_trims_cells() {
        let records = parse_csv("schedules", SCHEDULES.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("trainNumber"), Some("101"));
        assert_eq!(records[0].get("stationFrom"), Some("NDLS"));
        assert_eq!(records[1].get("trainRunsOnSun"), Some("Y"));
    }

    #[test]
    fn parse_csv_allows_short_rows() {
        let records = parse_csv("t", b"a,b,c\n1,2\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("b"), Some("2"));
        assert_eq!(records[0].get("c"), None);
    }

    #[test]
    fn parse_csv_empty_input() {
        let records = parse_csv("t", b"").unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn loads_files_in_priority_order() {
        let dir = tempdir().unwrap();
        let schedules = dir.path().join("schedules.csv");
        let cleartrip = dir.path().join("cleartrip.csv");
        let timetable = dir.path().join("train_schedule.csv");
        std::fs::write(&schedules, SCHEDULES).unwrap();
        std::fs::write(&cleartrip, "trainNumber,Source,Destination\n303,HWH,NDLS\n").unwrap();
        std::fs::write(
            &timetable,
            "Train_No,Departure_Time,Arrival_time\n101,16:55,08:15\n",
        )
        .unwrap();

        let config = CsvProviderConfig::new(SourceLocation::Path(timetable))
            .with_source("schedules", SourceLocation::Path(schedules))
            .with_source("cleartrip", SourceLocation::Path(cleartrip));
        let provider = CsvSourceProvider::new(config).unwrap();

        let batches = provider.load_sources().await.unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].source_id.as_str(), "schedules");
        assert_eq!(batches[0].records.len(), 2);
        assert_eq!(batches[1].source_id.as_str(), "cleartrip");
        assert_eq!(batches[1].records[0].get("Source"), Some("HWH"));

        let timetable = provider.load_timetable().await.unwrap();
        assert_eq!(timetable.len(), 1);
        assert_eq!(timetable[0].get("Departure_Time"), Some("16:55"));
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let dir = tempdir().unwrap();
        let config = CsvProviderConfig::new(SourceLocation::Path(dir.path().join("tt.csv")))
            .with_source("schedules", SourceLocation::Path(dir.path().join("nope.csv")));
        let provider = CsvSourceProvider::new(config).unwrap();

        match provider.load_sources().await {
            Err(SourceError::Unavailable { source_id, .. }) => assert_eq!(source_id, "schedules"),
            other => panic!("expected Unavailable, got {other:?}"),
        }
        assert!(matches!(
            provider.load_timetable().await,
            Err(SourceError::Unavailable { .. })
        ));
    }
}
