//! Station sources.
//!
//! Two interchangeable ways of obtaining the current station list:
//!
//! - [`RemoteStationSource`]: one request to the open data search API
//! - [`LocalStationSource`]: a bundled `;`-delimited extract
//!
//! Both normalize through [`crate::domain::normalize`] and are exposed
//! behind the [`StationSource`] trait so callers never care which is active.

mod error;
mod local;
mod remote;
mod types;

use std::future::Future;

use crate::domain::Station;

pub use error::{FetchError, LoadError, SourceError};
pub use local::{LocalSourceConfig, LocalStationSource, parse_stations};
pub use remote::{RemoteSourceConfig, RemoteStationSource, parse_envelope};
pub use types::{RawFields, RawRecord, SearchEnvelope};

/// Something that can produce the current ordered list of stations.
///
/// Each call is a fresh, single attempt. Nothing is cached between calls.
pub trait StationSource {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Produce the current stations in source order.
    fn stations(&self) -> impl Future<Output = Result<Vec<Station>, SourceError>> + Send;
}

impl StationSource for RemoteStationSource {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn stations(&self) -> Result<Vec<Station>, SourceError> {
        Ok(self.fetch().await?)
    }
}

impl StationSource for LocalStationSource {
    fn name(&self) -> &'static str {
        "local"
    }

    /// Reads synchronously; the extract is small and bundled.
    async fn stations(&self) -> Result<Vec<Station>, SourceError> {
        Ok(self.load_default()?)
    }
}

/// The source selected at start-up.
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Remote(RemoteStationSource),
    Local(LocalStationSource),
}

impl StationSource for ConfiguredSource {
    fn name(&self) -> &'static str {
        match self {
            ConfiguredSource::Remote(s) => s.name(),
            ConfiguredSource::Local(s) => s.name(),
        }
    }

    async fn stations(&self) -> Result<Vec<Station>, SourceError> {
        match self {
            ConfiguredSource::Remote(s) => s.stations().await,
            ConfiguredSource::Local(s) => s.stations().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AvailabilityTier;
    use tempfile::tempdir;

    #[tokio::test]
    async fn local_through_trait() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("stations.csv"),
            "header\nPlaza Mayor;0;12\nAv. Central;4;2\nPuerto;9;1",
        )
        .unwrap();

        let source = ConfiguredSource::Local(LocalStationSource::new(LocalSourceConfig::new(
            dir.path(),
        )));
        assert_eq!(source.name(), "local");

        let tiers: Vec<_> = source
            .stations()
            .await
            .unwrap()
            .iter()
            .map(Station::tier)
            .collect();
        assert_eq!(
            tiers,
            vec![
                AvailabilityTier::Empty,
                AvailabilityTier::Low,
                AvailabilityTier::Normal
            ]
        );
    }

    #[tokio::test]
    async fn missing_local_resource_surfaces_as_load_error() {
        let dir = tempdir().unwrap();
        let source = ConfiguredSource::Local(LocalStationSource::new(LocalSourceConfig::new(
            dir.path(),
        )));

        let err = source.stations().await.unwrap_err();
        assert!(matches!(
            err,
            SourceError::Load(LoadError::ResourceNotFound { .. })
        ));
    }
}
