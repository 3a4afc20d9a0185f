//! Application state management

use crate::api_client::{BookingClient, BookingSource};
use hallstats_core::{Config, Result};
use std::sync::Arc;

/// Application state holding configuration and the booking source
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Where each page lifetime fetches its dataset from
    pub source: Arc<dyn BookingSource>,
}

impl AppState {
    /// Create state backed by the configured HTTP source
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let client = BookingClient::new(&config.source)?;
        Ok(Self::with_source(config, Arc::new(client)))
    }

    /// Create state backed by an arbitrary source
    #[must_use]
    pub fn with_source(config: Config, source: Arc<dyn BookingSource>) -> Self {
        Self { config, source }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
