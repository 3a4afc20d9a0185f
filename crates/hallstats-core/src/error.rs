//! Error types for the booking dashboard

use std::{error::Error as StdError, fmt};

/// Main error type for the booking dashboard
#[derive(Debug)]
pub enum Error {
    /// Configuration error
    Configuration {
        /// Error message
        message: String,
    },

    /// Validation error
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// The booking source could not be reached or its body could not be read
    Fetch {
        /// Requested URL
        url: String,
        /// Underlying failure
        message: String,
    },

    /// The booking source answered with a non-success status
    UnexpectedStatus {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// A record carries a value an aggregator cannot use
    MalformedRecord {
        /// Position of the record in the dataset
        index: usize,
        /// Field holding the bad value
        field: &'static str,
        /// The offending value, or `None` when it was missing
        value: Option<String>,
        /// Why the value was rejected
        reason: String,
    },
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a [`Error::MalformedRecord`]
    pub fn malformed(
        index: usize,
        field: &'static str,
        value: Option<&str>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            index,
            field,
            value: value.map(str::to_string),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Validation { field, message } => {
                write!(f, "Validation error: {field} - {message}")
            }
            Self::Fetch { url, message } => write!(f, "Failed to fetch {url}: {message}"),
            Self::UnexpectedStatus { url, status } => {
                write!(f, "Booking source {url} returned status {status}")
            }
            Self::MalformedRecord {
                index,
                field,
                value,
                reason,
            } => match value {
                Some(value) => write!(
                    f,
                    "Malformed record #{index}: {field} = {value:?} ({reason})"
                ),
                None => write!(f, "Malformed record #{index}: {field} missing ({reason})"),
            },
        }
    }
}

impl StdError for Error {}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}
