//! Station source error types.

use std::path::PathBuf;

/// Errors from the remote station search endpoint.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the response envelope
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },
}

/// Errors from reading a bundled station resource.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The named resource is not bundled.
    #[error("station resource not found: {}", path.display())]
    ResourceNotFound { path: PathBuf },

    /// The resource exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Any failure of a [`StationSource`](super::StationSource).
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Load(#[from] LoadError),
}
