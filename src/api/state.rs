//! Application state for the API server

use crate::Config;
use crate::export::SearchExporter;
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned for each request (cheap Arc clone).
#[derive(Clone)]
pub struct AppState {
    /// Runs searches and writes CSV exports
    pub exporter: Arc<SearchExporter>,

    /// Configuration (read-only)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(exporter: Arc<SearchExporter>, config: Arc<Config>) -> Self {
        Self { exporter, config }
    }
}
