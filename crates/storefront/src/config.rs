//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CONTENT_DATABASE_URL` - `PostgreSQL` connection string, only when
//!   `STOREFRONT_CONTENT_SOURCE=store` (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: <http://localhost:3000>)
//! - `STOREFRONT_CONTENT_SOURCE` - `static` or `store` (default: static)
//! - `STOREFRONT_CONTENT_DIR` - Directory of section documents (default: crates/storefront/content)
//! - `STOREFRONT_CONTENT_URL` - Base URL to fetch section documents from instead of the directory
//! - `ADMIN_PANEL_URL` - Where `?admin=true` sends visitors
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 0.1)

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_CONTENT_DIR: &str = "crates/storefront/content";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where page sections get their content from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentSource {
    /// Published JSON section documents.
    #[default]
    Static,
    /// The content store, with documents for sections it does not model.
    Store,
}

impl ContentSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Store => "store",
        }
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "store" => Ok(Self::Store),
            other => Err(format!("expected 'static' or 'store', got '{other}'")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Which provider resolves page sections
    pub content_source: ContentSource,
    /// Directory holding `<document>.json` files
    pub content_dir: PathBuf,
    /// Remote base URL for section documents; replaces `content_dir` when set
    pub content_url: Option<Url>,
    /// Content store connection URL (contains password)
    pub database_url: Option<SecretString>,
    /// Admin panel entry point for `?admin=true`
    pub admin_panel_url: Option<Url>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is invalid, or if the store source
    /// is selected without a database URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", "http://localhost:3000");
        let content_source = get_env_or_default("STOREFRONT_CONTENT_SOURCE", "static")
            .parse::<ContentSource>()
            .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_CONTENT_SOURCE".to_string(), e))?;
        let content_dir = PathBuf::from(get_env_or_default(
            "STOREFRONT_CONTENT_DIR",
            DEFAULT_CONTENT_DIR,
        ));
        let content_url = get_optional_url("STOREFRONT_CONTENT_URL")?.map(with_trailing_slash);
        let admin_panel_url = get_optional_url("ADMIN_PANEL_URL")?;

        // Only the store source needs a database
        let database_url = match content_source {
            ContentSource::Store => Some(get_database_url("CONTENT_DATABASE_URL")?),
            ContentSource::Static => None,
        };

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.1);

        Ok(Self {
            host,
            port,
            base_url,
            content_source,
            content_dir,
            content_url,
            database_url,
            admin_panel_url,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Configuration for tests and local previews: static documents from
    /// `content_dir`, no admin link, no Sentry.
    #[must_use]
    pub fn local(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            content_source: ContentSource::Static,
            content_dir: content_dir.into(),
            content_url: None,
            database_url: None,
            admin_panel_url: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an optional environment variable parsed as an absolute URL.
fn get_optional_url(key: &str) -> Result<Option<Url>, ConfigError> {
    get_optional_env(key)
        .map(|raw| parse_url(key, &raw))
        .transpose()
}

fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Document URLs are joined relative to the base, which drops the last
/// path segment unless it ends in `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_content_source_parse() {
        assert_eq!("static".parse::<ContentSource>(), Ok(ContentSource::Static));
        assert_eq!(" Store ".parse::<ContentSource>(), Ok(ContentSource::Store));
        assert!("supabase".parse::<ContentSource>().is_err());
        assert_eq!(ContentSource::default(), ContentSource::Static);
    }

    #[test]
    fn test_parse_url_rejects_relative() {
        let err = parse_url("ADMIN_PANEL_URL", "/admin").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "ADMIN_PANEL_URL"));
        assert!(parse_url("ADMIN_PANEL_URL", "https://admin.finointegrino.rs").is_ok());
    }

    #[test]
    fn test_with_trailing_slash() {
        let url = with_trailing_slash(Url::parse("https://cdn.example.net/content").unwrap());
        assert_eq!(url.as_str(), "https://cdn.example.net/content/");
        assert_eq!(
            url.join("hero.json").unwrap().as_str(),
            "https://cdn.example.net/content/hero.json"
        );

        let url = with_trailing_slash(Url::parse("https://cdn.example.net/content/").unwrap());
        assert_eq!(url.as_str(), "https://cdn.example.net/content/");
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig::local("content");
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let mut config = StorefrontConfig::local("content");
        config.database_url = Some(SecretString::from("postgres://fino:hunter2@db/content"));

        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("hunter2"));
    }
}
