//! Client configuration
//!
//! | Env var | Default | Meaning |
//! |---------|---------|---------|
//! | MARKET_API_URL | http://localhost:5000/api | Backend base URL |
//! | MARKET_TIMEOUT_SECS | 30 | Request timeout (seconds) |
//! | MARKET_CREDENTIAL_PATH | ./.market/credential.json | Cached token + user |
//! | MARKET_RETRY_ATTEMPTS | 3 | Max attempts for payment calls |
//! | MARKET_RETRY_BASE_MS | 500 | Backoff base delay (milliseconds) |

use std::path::PathBuf;
use std::time::Duration;

use crate::retry::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CREDENTIAL_PATH: &str = "./.market/credential.json";

/// Client configuration for connecting to the marketplace backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Where the token and user are cached between runs (None = memory only)
    pub credential_path: Option<PathBuf>,

    /// Retry policy for payment initiation and return confirmation
    pub retry: RetryPolicy,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
            credential_path: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = RetryPolicy::default();
        let retry = RetryPolicy::new(
            env_parse("MARKET_RETRY_ATTEMPTS").unwrap_or(defaults.max_attempts),
            env_parse("MARKET_RETRY_BASE_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.base_delay),
        );

        Self {
            base_url: std::env::var("MARKET_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            timeout: env_parse("MARKET_TIMEOUT_SECS").unwrap_or(DEFAULT_TIMEOUT_SECS),
            credential_path: Some(
                std::env::var("MARKET_CREDENTIAL_PATH")
                    .unwrap_or_else(|_| DEFAULT_CREDENTIAL_PATH.into())
                    .into(),
            ),
            retry,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Persist credentials to this file
    pub fn with_credential_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credential_path = Some(path.into());
        self
    }

    /// Keep credentials in memory only
    pub fn without_credential_file(mut self) -> Self {
        self.credential_path = None;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
