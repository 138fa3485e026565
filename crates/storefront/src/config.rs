//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; invalid values are rejected at startup.
//!
//! - `GROCIFY_HOST` - Bind address (default: 127.0.0.1)
//! - `GROCIFY_PORT` - Listen port (default: 5000)
//! - `GROCIFY_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `GROCIFY_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `GROCIFY_DEMO_PASSWORD` - When set, seeds the demo account at startup
//! - `GROCIFY_DEMO_USERNAME` - Demo account username (default: grouser)
//! - `GROCIFY_DEMO_EMAIL` - Demo account email (default: user@grocify.com)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::services::auth::MIN_PASSWORD_LENGTH;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
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
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Log output format
    pub log_format: LogFormat,
    /// Demo account seeded at startup, if configured
    pub demo_user: Option<DemoUserConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. production, staging)
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Demo account seeded into an empty user store.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct DemoUserConfig {
    pub username: String,
    pub email: String,
    pub password: SecretString,
}

impl std::fmt::Debug for DemoUserConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoUserConfig")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, or if the
    /// demo password is too short.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default::<IpAddr>("GROCIFY_HOST", "127.0.0.1")?;
        let port = parse_env_or_default::<u16>("GROCIFY_PORT", "5000")?;
        let static_dir = PathBuf::from(get_env_or_default(
            "GROCIFY_STATIC_DIR",
            "crates/storefront/static",
        ));
        let log_format = parse_env_or_default::<LogFormat>("GROCIFY_LOG_FORMAT", "pretty")?;
        let demo_user = DemoUserConfig::from_env()?;

        Ok(Self {
            host,
            port,
            static_dir,
            log_format,
            demo_user,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env_or_default("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for StorefrontConfig {
    /// Local defaults with no demo account and no Sentry.
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 5000,
            static_dir: PathBuf::from("crates/storefront/static"),
            log_format: LogFormat::Pretty,
            demo_user: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl DemoUserConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(password) = get_optional_env("GROCIFY_DEMO_PASSWORD") else {
            return Ok(None);
        };
        let password = SecretString::from(password);
        validate_demo_password(&password, "GROCIFY_DEMO_PASSWORD")?;

        Ok(Some(Self {
            username: get_env_or_default("GROCIFY_DEMO_USERNAME", "grouser"),
            email: get_env_or_default("GROCIFY_DEMO_EMAIL", "user@grocify.com"),
            password,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// The demo password goes through the same length rule as registration.
fn validate_demo_password(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let len = secret.expose_secret().chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("must be at least {MIN_PASSWORD_LENGTH} characters (got {len})"),
        ));
    }
    Ok(())
}
