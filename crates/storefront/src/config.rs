//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DEPOT_DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `DEPOT_HOST` - Bind address (default: 127.0.0.1)
//! - `DEPOT_PORT` - Listen port (default: 3000)
//! - `DEPOT_BASE_URL` - Public URL (default: `http://localhost:3000`);
//!   an `https://` base URL marks session cookies as secure
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag (e.g. "production")

use std::env;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Sentry DSN (error tracking disabled when absent)
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a required variable is missing or a value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Split out from [`Self::from_env`] so tests can supply variables
    /// without mutating the process environment.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = get("DEPOT_DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DEPOT_DATABASE_URL".to_owned()))?;

        let host: IpAddr = get("DEPOT_HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_owned())
            .parse()
            .map_err(|e| ConfigError::InvalidEnvVar("DEPOT_HOST".to_owned(), format!("{e}")))?;

        let port: u16 = match get("DEPOT_PORT") {
            Some(raw) => raw.parse().map_err(|e| {
                ConfigError::InvalidEnvVar("DEPOT_PORT".to_owned(), format!("{e}"))
            })?,
            None => DEFAULT_PORT,
        };

        let base_url = get("DEPOT_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

        Ok(Self {
            database_url: SecretString::from(database_url),
            host,
            port,
            base_url,
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
        })
    }

    /// The socket address to bind the server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| map.get(key).map(|v| (*v).to_owned())
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = StorefrontConfig::from_lookup(lookup(&[(
            "DEPOT_DATABASE_URL",
            "postgres://localhost/depot",
        )]))
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(!config.is_secure());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = StorefrontConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(name) if name == "DEPOT_DATABASE_URL"));
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = StorefrontConfig::from_lookup(lookup(&[
            ("DEPOT_DATABASE_URL", "postgres://localhost/depot"),
            ("DEPOT_PORT", "not-a-port"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(name, _) if name == "DEPOT_PORT"));
    }

    #[test]
    fn https_base_url_marks_cookies_secure() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("DEPOT_DATABASE_URL", "postgres://localhost/depot"),
            ("DEPOT_BASE_URL", "https://depot.example.com"),
        ]))
        .unwrap();
        assert!(config.is_secure());
    }
}
