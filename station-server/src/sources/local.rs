//! Local station source backed by a bundled `;`-delimited extract.
//!
//! The file's first line is a header and is always skipped. Every other
//! line is `address;available;free[;...]`. Lines with fewer than three
//! fields are dropped, counts that do not parse become 0.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;

use tracing::{debug, info};

use crate::domain::{Station, normalize};

use super::error::LoadError;

/// Default directory holding bundled resources.
const DEFAULT_RESOURCE_DIR: &str = "resources";

/// Default station extract name.
const DEFAULT_RESOURCE_NAME: &str = "stations.csv";

/// Minimum number of fields for a data row to be kept.
const MIN_FIELDS: usize = 3;

/// Configuration for the local station source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSourceConfig {
    /// Directory containing bundled resources
    pub resource_dir: PathBuf,
    /// Resource read by [`LocalStationSource::load_default`]
    pub resource_name: String,
}

impl LocalSourceConfig {
    pub fn new(resource_dir: impl Into<PathBuf>) -> Self {
        Self {
            resource_dir: resource_dir.into(),
            resource_name: DEFAULT_RESOURCE_NAME.to_string(),
        }
    }

    /// Set the resource read by default.
    pub fn with_resource_name(mut self, name: impl Into<String>) -> Self {
        self.resource_name = name.into();
        self
    }
}

impl Default for LocalSourceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RESOURCE_DIR)
    }
}

/// Reads stations from bundled text resources.
#[derive(Debug, Clone)]
pub struct LocalStationSource {
    config: LocalSourceConfig,
}

impl LocalStationSource {
    pub fn new(config: LocalSourceConfig) -> Self {
        Self { config }
    }

    /// Load the configured default resource.
    pub fn load_default(&self) -> Result<Vec<Station>, LoadError> {
        self.load(&self.config.resource_name)
    }

    /// Load stations from the named resource.
    ///
    /// A missing resource is a packaging defect and fails with
    /// [`LoadError::ResourceNotFound`]. Malformed rows never fail the load.
    pub fn load(&self, resource_name: &str) -> Result<Vec<Station>, LoadError> {
        let path = self.resource_path(resource_name);

        let file = File::open(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                LoadError::ResourceNotFound { path: path.clone() }
            } else {
                LoadError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        let stations = parse_stations(file).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;

        info!(count = stations.len(), path = %path.display(), "loaded local stations");
        Ok(stations)
    }

    /// Full path of a named resource.
    pub fn resource_path(&self, resource_name: &str) -> PathBuf {
        self.config.resource_dir.join(resource_name)
    }
}

/// Parse a station extract from any reader.
///
/// Only I/O failures are returned as errors. Rows that are short or not
/// valid UTF-8 are skipped.
pub fn parse_stations<R: Read>(input: R) -> io::Result<Vec<Station>> {
    let mut input = BufReader::new(input);

    // Header: discarded whatever it contains, even if blank.
    if !skip_line(&mut input)? {
        return Ok(Vec::new());
    }

    let mut rows = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(input);

    let mut stations = Vec::new();
    for (index, row) in rows.records().enumerate() {
        let record = match row {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(into_io_error(e)),
            Err(e) => {
                debug!(row = index + 1, error = %e, "skipping unreadable row");
                continue;
            }
        };

        if record.len() < MIN_FIELDS {
            debug!(row = index + 1, fields = record.len(), "skipping short row");
            continue;
        }

        stations.push(normalize(
            Some(&record[0]),
            parse_count(&record[1]),
            parse_count(&record[2]),
        ));
    }

    Ok(stations)
}

/// Consume one line ending in `\n`, `\r` or `\r\n`, the same terminators
/// the row reader splits on. Returns `false` at end of input.
fn skip_line<R: BufRead>(input: &mut R) -> io::Result<bool> {
    let mut seen = false;
    loop {
        let buf = input.fill_buf()?;
        if buf.is_empty() {
            return Ok(seen);
        }
        seen = true;

        match buf.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(i) => {
                let carriage_return = buf[i] == b'\r';
                input.consume(i + 1);
                if carriage_return && input.fill_buf()?.first() == Some(&b'\n') {
                    input.consume(1);
                }
                return Ok(true);
            }
            None => {
                let len = buf.len();
                input.consume(len);
            }
        }
    }
}

/// Parse a count field, `None` when it is not an integer.
fn parse_count(field: &str) -> Option<i32> {
    field.trim().parse().ok()
}

fn into_io_error(err: csv::Error) -> io::Error {
    match err.into_kind() {
        csv::ErrorKind::Io(e) => e,
        other => io::Error::other(format!("{other:?}")),
    }
}
