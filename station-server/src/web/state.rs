//! Application state for the web layer.

use std::sync::Arc;

use crate::sources::ConfiguredSource;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Source consulted on every page load
    pub source: Arc<ConfiguredSource>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(source: ConfiguredSource) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}
