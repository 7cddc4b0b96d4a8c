//! Server configuration parsed from environment variables.
//!
//! This module provides configuration types and parsing for the service. All
//! settings can be overridden via environment variables prefixed with
//! `FEATUREDOC_`, and again from the command line.

use std::env;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::num::{NonZeroU64, NonZeroUsize};
use std::str::FromStr;
use std::time::Duration;

use crate::error::ServerError;

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Info` when not specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging, includes all trace spans.
    Trace,
    /// Debug-level information for development.
    Debug,
    /// Standard informational messages.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for failures.
    Error,
}

impl FromStr for LogLevel {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ServerError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

const ENV_LOG_LEVEL: &str = "FEATUREDOC_LOG_LEVEL";
const ENV_BIND_ADDR: &str = "FEATUREDOC_BIND_ADDR";
const ENV_MAX_UPLOAD_BYTES: &str = "FEATUREDOC_MAX_UPLOAD_BYTES";
const ENV_CACHE_TTL_SECS: &str = "FEATUREDOC_CACHE_TTL_SECS";
const ENV_CACHE_CAPACITY: &str = "FEATUREDOC_CACHE_CAPACITY";

/// Default listening address.
const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 8000));

/// Default upload limit (5 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Default document lifetime in seconds.
const DEFAULT_CACHE_TTL_SECS: u64 = 600;

/// Default number of cached documents.
const DEFAULT_CACHE_CAPACITY: u64 = 256;

/// Configuration for the service.
///
/// # Environment Variables
///
/// - `FEATUREDOC_LOG_LEVEL`: log level (trace, debug, info, warn, error)
/// - `FEATUREDOC_BIND_ADDR`: socket address to listen on
/// - `FEATUREDOC_MAX_UPLOAD_BYTES`: largest accepted feature file
/// - `FEATUREDOC_CACHE_TTL_SECS`: lifetime of generated documents
/// - `FEATUREDOC_CACHE_CAPACITY`: maximum number of cached documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: LogLevel,
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: usize,
    /// How long a generated document stays downloadable.
    pub cache_ttl: Duration,
    /// Maximum number of documents held at once.
    pub cache_capacity: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            bind_addr: DEFAULT_BIND_ADDR,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Command-line values taking precedence over the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigOverrides {
    /// Replacement log level.
    pub log_level: Option<LogLevel>,
    /// Replacement listening address.
    pub bind_addr: Option<SocketAddr>,
    /// Replacement upload limit.
    pub max_upload_bytes: Option<NonZeroUsize>,
    /// Replacement document lifetime in seconds.
    pub cache_ttl_secs: Option<NonZeroU64>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Falls back to defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::InvalidConfig` if an environment variable contains
    /// an invalid value.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration using `lookup` to resolve variable names.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuredoc_server::config::{LogLevel, ServerConfig};
    ///
    /// let config = ServerConfig::from_lookup(|key| {
    ///     (key == "FEATUREDOC_LOG_LEVEL").then(|| "debug".to_owned())
    /// })
    /// .unwrap();
    /// assert_eq!(config.log_level, LogLevel::Debug);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ServerError::InvalidConfig` if a value cannot be parsed or is
    /// zero where a positive number is required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_level = match lookup(ENV_LOG_LEVEL) {
            Some(val) => val.parse()?,
            None => defaults.log_level,
        };
        let bind_addr = parse_setting::<SocketAddr, _>(&lookup, ENV_BIND_ADDR, "a socket address")?
            .unwrap_or(defaults.bind_addr);
        let max_upload_bytes =
            parse_setting::<NonZeroUsize, _>(&lookup, ENV_MAX_UPLOAD_BYTES, "a positive integer")?
                .map_or(defaults.max_upload_bytes, NonZeroUsize::get);
        let cache_ttl =
            parse_setting::<NonZeroU64, _>(&lookup, ENV_CACHE_TTL_SECS, "a positive integer")?
                .map_or(defaults.cache_ttl, |secs| Duration::from_secs(secs.get()));
        let cache_capacity =
            parse_setting::<NonZeroU64, _>(&lookup, ENV_CACHE_CAPACITY, "a positive integer")?
                .map_or(defaults.cache_capacity, NonZeroU64::get);

        Ok(Self {
            log_level,
            bind_addr,
            max_upload_bytes,
            cache_ttl,
            cache_capacity,
        })
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// This is intended for CLI overrides that should take precedence over
    /// environment-based defaults.
    #[must_use]
    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        if let Some(addr) = overrides.bind_addr {
            self.bind_addr = addr;
        }
        if let Some(bytes) = overrides.max_upload_bytes {
            self.max_upload_bytes = bytes.get();
        }
        if let Some(secs) = overrides.cache_ttl_secs {
            self.cache_ttl = Duration::from_secs(secs.get());
        }
        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Create a new configuration with the specified upload limit.
    #[must_use]
    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    /// Create a new configuration with the specified document lifetime.
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

fn parse_setting<T, F>(lookup: &F, key: &str, expected: &str) -> Result<Option<T>, ServerError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|val| {
            val.trim().parse().map_err(|_| {
                ServerError::InvalidConfig(format!(
                    "invalid {key} value '{val}', expected {expected}"
                ))
            })
        })
        .transpose()
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn log_level_parses_valid_values() {
        assert_eq!("trace".parse::<LogLevel>().ok(), Some(LogLevel::Trace));
        assert_eq!("debug".parse::<LogLevel>().ok(), Some(LogLevel::Debug));
        assert_eq!("info".parse::<LogLevel>().ok(), Some(LogLevel::Info));
        assert_eq!("warn".parse::<LogLevel>().ok(), Some(LogLevel::Warn));
        assert_eq!("warning".parse::<LogLevel>().ok(), Some(LogLevel::Warn));
        assert_eq!("error".parse::<LogLevel>().ok(), Some(LogLevel::Error));
    }

    #[test]
    fn log_level_is_case_insensitive() {
        assert_eq!("TRACE".parse::<LogLevel>().ok(), Some(LogLevel::Trace));
        assert_eq!("Debug".parse::<LogLevel>().ok(), Some(LogLevel::Debug));
    }

    #[test]
    fn log_level_rejects_invalid_values() {
        let result = "invalid".parse::<LogLevel>();
        assert!(result.unwrap_err().to_string().contains("unknown log level"));
    }

    #[test]
    fn server_config_default_values() {
        let config = ServerConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8000");
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(config.cache_ttl, Duration::from_secs(600));
        assert_eq!(config.cache_capacity, 256);
    }

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("FEATUREDOC_LOG_LEVEL", "warn"),
            ("FEATUREDOC_BIND_ADDR", "0.0.0.0:9090"),
            ("FEATUREDOC_MAX_UPLOAD_BYTES", "1024"),
            ("FEATUREDOC_CACHE_TTL_SECS", " 30 "),
            ("FEATUREDOC_CACHE_CAPACITY", "8"),
        ]))
        .unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:9090");
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.cache_ttl, Duration::from_secs(30));
        assert_eq!(config.cache_capacity, 8);
    }

    #[test]
    fn rejects_zero_sizes() {
        let err = ServerConfig::from_lookup(lookup_from(&[("FEATUREDOC_MAX_UPLOAD_BYTES", "0")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: invalid FEATUREDOC_MAX_UPLOAD_BYTES value '0', expected a positive integer"
        );
    }

    #[test]
    fn rejects_malformed_address() {
        let err = ServerConfig::from_lookup(lookup_from(&[("FEATUREDOC_BIND_ADDR", "localhost")]))
            .unwrap_err();
        assert!(err.to_string().contains("FEATUREDOC_BIND_ADDR"));
    }

    #[test]
    fn apply_overrides_updates_selected_fields() {
        let config = ServerConfig::default().apply_overrides(ConfigOverrides {
            log_level: Some(LogLevel::Error),
            cache_ttl_secs: NonZeroU64::new(5),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.cache_ttl, Duration::from_secs(5));
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);

        let config = ServerConfig::default().apply_overrides(ConfigOverrides::default());
        assert_eq!(config, ServerConfig::default());
    }
}
