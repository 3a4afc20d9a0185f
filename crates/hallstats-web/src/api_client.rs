//! HTTP client for the booking backend

use async_trait::async_trait;
use hallstats_core::{BookingRecord, Error, Result, config::SourceConfig};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Producer of the booking list for one page lifetime
#[async_trait]
pub trait BookingSource: Send + Sync {
    /// Fetch every booking record, in backend order
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be obtained.
    async fn fetch_bookings(&self) -> Result<Vec<BookingRecord>>;
}

/// Client for the backend's bookings listing
///
/// Issues a single unauthenticated `GET` with no query parameters.
#[derive(Debug, Clone)]
pub struct BookingClient {
    client: Client,
    url: String,
}

impl BookingClient {
    /// Create a client for the configured source
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(source: &SourceConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = source.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        let client = builder.build().map_err(|e| Error::Configuration {
            message: format!("Failed to build HTTP client: {e}"),
        })?;

        Ok(Self {
            client,
            url: source.bookings_url(),
        })
    }

    /// URL the bookings are fetched from
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    fn fetch_error(&self, err: &reqwest::Error) -> Error {
        Error::Fetch {
            url: self.url.clone(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl BookingSource for BookingClient {
    async fn fetch_bookings(&self) -> Result<Vec<BookingRecord>> {
        debug!(url = %self.url, "fetching bookings");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.fetch_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UnexpectedStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let records: Vec<BookingRecord> =
            response.json().await.map_err(|e| self.fetch_error(&e))?;

        debug!(count = records.len(), "bookings fetched");
        Ok(records)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_client_url_from_config() {
        let source = SourceConfig {
            base_url: "http://backend:5000/".to_string(),
            ..SourceConfig::default()
        };
        let client = BookingClient::new(&source).unwrap();
        assert_eq!(client.url(), "http://backend:5000/bookings");
    }

    #[test]
    fn test_client_with_timeout() {
        let source = SourceConfig {
            timeout_seconds: Some(5),
            ..SourceConfig::default()
        };
        assert!(BookingClient::new(&source).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_fetch_error() {
        let source = SourceConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..SourceConfig::default()
        };
        let client = BookingClient::new(&source).unwrap();

        let err = client.fetch_bookings().await.unwrap_err();
        assert!(matches!(err, Error::Fetch { ref url, .. } if url == "http://127.0.0.1:1/bookings"));
    }
}
