//! Remote station source backed by the opendatasoft search API.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::{Station, normalize};

use super::error::FetchError;
use super::types::SearchEnvelope;

/// Default base URL for the Valencia open data portal.
const DEFAULT_BASE_URL: &str = "https://valencia.opendatasoft.com";

/// Default dataset: Valenbisi live availability.
const DEFAULT_DATASET: &str = "valenbisi-disponibilitat-valenbisi-dsiponibilidad";

/// Default page size. Only the first page is ever requested.
const DEFAULT_ROWS: u32 = 100;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Search API path, relative to the base URL.
const SEARCH_PATH: &str = "api/records/1.0/search/";

/// Configuration for the remote station source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSourceConfig {
    /// Base URL of the portal
    pub base_url: String,
    /// Dataset identifier
    pub dataset: String,
    /// Page size
    pub rows: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RemoteSourceConfig {
    /// Create a config pointing at the default portal and dataset.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            dataset: DEFAULT_DATASET.to_string(),
            rows: DEFAULT_ROWS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the dataset identifier.
    pub fn with_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = dataset.into();
        self
    }

    /// Set the page size.
    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn search_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), SEARCH_PATH)
    }
}

impl Default for RemoteSourceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetches stations from the search endpoint.
///
/// Each call to [`fetch`](Self::fetch) issues exactly one request for the
/// first page of results. There is no retry and no paging: a dataset larger
/// than `rows` is truncated. Dropping the returned future aborts the request.
#[derive(Debug, Clone)]
pub struct RemoteStationSource {
    http: reqwest::Client,
    url: String,
    dataset: String,
    rows: u32,
}

impl RemoteStationSource {
    /// Create a new remote source.
    pub fn new(config: RemoteSourceConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            url: config.search_url(),
            http,
            dataset: config.dataset,
            rows: config.rows,
        })
    }

    /// Fetch the first page of stations.
    pub async fn fetch(&self) -> Result<Vec<Station>, FetchError> {
        debug!(url = %self.url, dataset = %self.dataset, rows = self.rows, "requesting stations");

        let response = self
            .http
            .get(&self.url)
            .query(&[
                ("dataset", self.dataset.clone()),
                ("rows", self.rows.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let envelope = parse_envelope(&body)?;

        let stations = envelope_to_stations(envelope, self.rows);
        info!(count = stations.len(), "fetched remote stations");
        Ok(stations)
    }
}

/// Parse a response body into an envelope.
///
/// An empty or `null` body is treated as an envelope with no records.
pub fn parse_envelope(body: &str) -> Result<SearchEnvelope, FetchError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(SearchEnvelope::default());
    }

    serde_json::from_str(trimmed).map_err(|e| FetchError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })
}

/// Normalize every record of an envelope, preserving order.
fn envelope_to_stations(envelope: SearchEnvelope, rows: u32) -> Vec<Station> {
    let records = envelope.records.unwrap_or_default();

    if let Some(total) = envelope.nhits
        && total > records.len() as u64
    {
        warn!(
            total,
            returned = records.len(),
            rows,
            "dataset exceeds one page; remaining records are not fetched"
        );
    }

    records
        .into_iter()
        .map(|record| {
            let fields = record.fields;
            normalize(fields.address.as_deref(), fields.available, fields.free)
        })
        .collect()
}
