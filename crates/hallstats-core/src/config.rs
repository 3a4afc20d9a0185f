//! Configuration management for the booking dashboard

use crate::aggregate::{MalformedPolicy, MonthOrder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::{Validate, ValidationError};

/// Environment variable prefix, e.g. `HALLSTATS_SOURCE__BASE_URL`
pub const ENV_PREFIX: &str = "HALLSTATS";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Config {
    /// Booking backend
    #[serde(default)]
    #[validate(nested)]
    pub source: SourceConfig,

    /// Dashboard web server
    #[serde(default)]
    #[validate(nested)]
    pub webserver: WebServerConfig,

    /// Aggregation behaviour
    #[serde(default)]
    pub aggregation: AggregationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where bookings are fetched from
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SourceConfig {
    /// Backend base URL
    #[serde(default = "default_base_url")]
    #[validate(url)]
    pub base_url: String,

    /// Path of the bookings listing, appended to `base_url`
    #[serde(default = "default_bookings_path")]
    #[validate(custom(function = "validate_bookings_path"))]
    pub bookings_path: String,

    /// Request timeout in seconds; no timeout when unset
    #[serde(default)]
    #[validate(range(min = 1))]
    pub timeout_seconds: Option<u64>,
}

/// Web server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WebServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    #[validate(range(min = 1))]
    pub port: u16,
}

/// How aggregators treat bad records and order months
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Policy for missing or unparseable grouping values
    #[serde(default)]
    pub malformed_policy: MalformedPolicy,

    /// Ordering of the monthly trend
    #[serde(default)]
    pub month_order: MonthOrder,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Structured JSON lines
    Json,
    /// Human-readable text
    #[default]
    Text,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format
    #[serde(default)]
    pub format: LogFormat,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_bookings_path() -> String {
    "/bookings".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn validate_bookings_path(path: &str) -> Result<(), ValidationError> {
    if path.starts_with('/') {
        Ok(())
    } else {
        Err(ValidationError::new("bookings_path_must_start_with_slash"))
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            bookings_path: default_bookings_path(),
            timeout_seconds: None,
        }
    }
}

impl SourceConfig {
    /// Full URL of the bookings listing
    #[must_use]
    pub fn bookings_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.bookings_path
        )
    }
}

impl Default for WebServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl Config {
    /// Load configuration from a file and the environment
    ///
    /// Without an explicit `path`, an optional `hallstats.{toml,yaml,json}` in
    /// the working directory is read. Environment variables prefixed with
    /// `HALLSTATS_` override file values, using `__` between nested keys.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed or validated.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        Self::load_with(path, environment())
    }

    fn load_with(path: Option<&Path>, env: config::Environment) -> crate::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("hallstats").required(false),
        };

        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()?;

        config.ensure_valid()?;
        Ok(config)
    }

    /// Run field validation
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] naming the first invalid field.
    pub fn ensure_valid(&self) -> crate::Result<()> {
        self.validate().map_err(|errors| {
            let field = errors
                .errors()
                .keys()
                .next()
                .map_or_else(|| "config".to_string(), ToString::to_string);
            crate::Error::Validation {
                field,
                message: errors.to_string(),
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.source.base_url, "http://localhost:5000");
        assert_eq!(config.source.bookings_path, "/bookings");
        assert!(config.source.timeout_seconds.is_none());
        assert_eq!(config.webserver.host, "127.0.0.1");
        assert_eq!(config.webserver.port, 3000);
        assert_eq!(config.aggregation.malformed_policy, MalformedPolicy::Skip);
        assert_eq!(config.aggregation.month_order, MonthOrder::FirstSeen);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.ensure_valid().is_ok());
    }

    #[test]
    fn test_bookings_url() {
        let mut source = SourceConfig::default();
        assert_eq!(source.bookings_url(), "http://localhost:5000/bookings");

        source.base_url = "http://backend:8000/".to_string();
        source.bookings_path = "/api/bookings".to_string();
        assert_eq!(source.bookings_url(), "http://backend:8000/api/bookings");
    }

    #[test]
    fn test_partial_config_deserialization() {
        let json_str = r#"{
            "source": {"base_url": "http://10.0.0.5:5000"},
            "aggregation": {"malformed_policy": "strict", "month_order": "chronological"},
            "logging": {"format": "json"}
        }"#;

        let config: Config = serde_json::from_str(json_str).unwrap();

        assert_eq!(config.source.base_url, "http://10.0.0.5:5000");
        assert_eq!(config.source.bookings_path, "/bookings");
        assert_eq!(config.webserver.port, 3000);
        assert_eq!(config.aggregation.malformed_policy, MalformedPolicy::Strict);
        assert_eq!(config.aggregation.month_order, MonthOrder::Chronological);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.source.base_url = "not a url".to_string();
        let err = config.ensure_valid().unwrap_err();
        assert!(matches!(err, crate::Error::Validation { .. }));

        let mut config = Config::default();
        config.source.bookings_path = "bookings".to_string();
        assert!(config.ensure_valid().is_err());

        let mut config = Config::default();
        config.webserver.port = 0;
        assert!(config.ensure_valid().is_err());

        let mut config = Config::default();
        config.source.timeout_seconds = Some(0);
        assert!(config.ensure_valid().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[source]
base_url = "http://bookings.internal:5000"
timeout_seconds = 10

[webserver]
port = 8088

[aggregation]
month_order = "chronological"
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();

        assert_eq!(config.source.base_url, "http://bookings.internal:5000");
        assert_eq!(config.source.timeout_seconds, Some(10));
        assert_eq!(config.webserver.port, 8088);
        assert_eq!(config.webserver.host, "127.0.0.1");
        assert_eq!(config.aggregation.month_order, MonthOrder::Chronological);
    }

    fn fake_env(vars: &[(&str, &str)]) -> config::Environment {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        environment().source(Some(vars))
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[source]
base_url = "http://bookings.internal:5000"

[webserver]
port = 8088
"#
        )
        .unwrap();
        let env = fake_env(&[
            ("HALLSTATS_SOURCE__BASE_URL", "http://override.internal:7000"),
            ("HALLSTATS_WEBSERVER__PORT", "9090"),
            ("HALLSTATS_AGGREGATION__MONTH_ORDER", "chronological"),
            ("UNRELATED__PORT", "1"),
        ]);

        let config = Config::load_with(Some(file.path()), env).unwrap();

        assert_eq!(config.source.base_url, "http://override.internal:7000");
        assert_eq!(config.webserver.port, 9090);
        assert_eq!(config.webserver.host, "127.0.0.1");
        assert_eq!(config.aggregation.month_order, MonthOrder::Chronological);
    }

    #[test]
    fn test_env_values_are_validated() {
        let env = fake_env(&[("HALLSTATS_WEBSERVER__PORT", "0")]);
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let err = Config::load_with(Some(file.path()), env).unwrap_err();

        assert!(matches!(err, crate::Error::Validation { ref field, .. } if field == "webserver"));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let err = Config::load(Some(Path::new("/nonexistent/hallstats.toml"))).unwrap_err();
        assert!(matches!(err, crate::Error::Configuration { .. }));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = Config::default();
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized.source.base_url, config.source.base_url);
        assert_eq!(deserialized.webserver.port, config.webserver.port);
        assert_eq!(deserialized.logging.format, config.logging.format);
    }
}
