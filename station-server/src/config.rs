//! Application configuration from environment variables.

use std::net::SocketAddr;
use std::str::FromStr;

use crate::sources::{
    ConfiguredSource, FetchError, LocalSourceConfig, LocalStationSource, RemoteSourceConfig,
    RemoteStationSource,
};

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to something we cannot use
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Which source backs the station list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Remote(RemoteSourceConfig),
    Local(LocalSourceConfig),
}

impl SourceConfig {
    /// Build the configured source.
    pub fn build(self) -> Result<ConfiguredSource, FetchError> {
        Ok(match self {
            SourceConfig::Remote(config) => {
                ConfiguredSource::Remote(RemoteStationSource::new(config)?)
            }
            SourceConfig::Local(config) => {
                ConfiguredSource::Local(LocalStationSource::new(config))
            }
        })
    }
}

/// Top-level configuration for the server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// Station source selection
    pub source: SourceConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `STATION_SOURCE` | `remote` (or `local`) |
    /// | `STATION_BASE_URL` | open data portal |
    /// | `STATION_DATASET` | Valenbisi availability |
    /// | `STATION_ROWS` | `100` |
    /// | `STATION_TIMEOUT_SECS` | `10` |
    /// | `STATION_RESOURCE_DIR` | `resources` |
    /// | `STATION_RESOURCE_NAME` | `stations.csv` |
    /// | `BIND_ADDR` | `127.0.0.1:3000` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = parse_var(&lookup, "BIND_ADDR")?
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));

        let kind = lookup("STATION_SOURCE").unwrap_or_else(|| "remote".to_string());
        let source = match kind.trim().to_ascii_lowercase().as_str() {
            "remote" => {
                let mut config = RemoteSourceConfig::new();
                if let Some(url) = lookup("STATION_BASE_URL") {
                    config = config.with_base_url(url);
                }
                if let Some(dataset) = lookup("STATION_DATASET") {
                    config = config.with_dataset(dataset);
                }
                if let Some(rows) = parse_var(&lookup, "STATION_ROWS")? {
                    config = config.with_rows(rows);
                }
                if let Some(secs) = parse_var(&lookup, "STATION_TIMEOUT_SECS")? {
                    config = config.with_timeout(secs);
                }
                SourceConfig::Remote(config)
            }
            "local" => {
                let mut config = match lookup("STATION_RESOURCE_DIR") {
                    Some(dir) => LocalSourceConfig::new(dir),
                    None => LocalSourceConfig::default(),
                };
                if let Some(name) = lookup("STATION_RESOURCE_NAME") {
                    config = config.with_resource_name(name);
                }
                SourceConfig::Local(config)
            }
            _ => {
                return Err(ConfigError::Invalid {
                    var: "STATION_SOURCE",
                    value: kind,
                    reason: "expected `remote` or `local`".to_string(),
                });
            }
        };

        Ok(Self { bind_addr, source })
    }
}

/// Look up and parse a variable, `None` when unset.
fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(var)
        .map(|value| {
            value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}
