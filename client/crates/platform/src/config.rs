//! Client Configuration
//!
//! Connection settings shared by every backend call.

use std::env;
use std::time::Duration;

/// Default backend API root
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Error when reading configuration from the environment
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Backend connection configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, without trailing slash (e.g. `http://localhost:8000/api/v1`)
    pub base_url: String,
    /// Whole-request timeout for JSON calls
    pub request_timeout: Duration,
    /// TCP connect timeout (also applies to streaming calls)
    pub connect_timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("newsai-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create config pointing at the given API root
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            ..Default::default()
        }
    }

    /// Load configuration from the environment
    ///
    /// ## Variables
    /// * `NEWSAI_API_URL` - API root (default [`DEFAULT_API_URL`])
    /// * `NEWSAI_TIMEOUT_SECS` - request timeout in seconds (default 30)
    /// * `NEWSAI_CONNECT_TIMEOUT_SECS` - connect timeout in seconds (default 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = env::var("NEWSAI_API_URL") {
            config.base_url = normalize_base_url(url);
        }
        if let Some(secs) = read_secs("NEWSAI_TIMEOUT_SECS")? {
            config.request_timeout = secs;
        }
        if let Some(secs) = read_secs("NEWSAI_CONNECT_TIMEOUT_SECS")? {
            config.connect_timeout = secs;
        }

        Ok(config)
    }

    /// Override the request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Build the absolute URL for an endpoint path such as `/auth/me`
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn read_secs(key: &'static str) -> Result<Option<Duration>, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        Err(_) => Ok(None),
    }
}
