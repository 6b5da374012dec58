//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::env;
use std::path::PathBuf;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Form-encoded login endpoint (never carries a bearer credential)
    pub login_endpoint: String,
    /// Refresh endpoint (never carries a bearer credential, never retried)
    pub refresh_endpoint: String,
    pub register_endpoint: String,
    pub me_endpoint: String,
    pub usage_endpoint: String,
    /// Where `FileCredentialStore` keeps the session
    pub credential_path: PathBuf,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_endpoint: "/auth/login".to_string(),
            refresh_endpoint: "/auth/refresh".to_string(),
            register_endpoint: "/auth/register".to_string(),
            me_endpoint: "/auth/me".to_string(),
            usage_endpoint: "/auth/me/usage".to_string(),
            credential_path: default_credential_path(),
        }
    }
}

impl AuthConfig {
    /// Load configuration from the environment
    ///
    /// `NEWSAI_CREDENTIALS` overrides the credential file location.
    pub fn from_env() -> Self {
        match env::var("NEWSAI_CREDENTIALS") {
            Ok(path) if !path.trim().is_empty() => Self {
                credential_path: PathBuf::from(path),
                ..Default::default()
            },
            _ => Self::default(),
        }
    }

    /// Whether the endpoint is the refresh endpoint (query string ignored)
    pub fn is_refresh_endpoint(&self, endpoint: &str) -> bool {
        endpoint_path(endpoint) == self.refresh_endpoint
    }

    /// Whether a bearer credential may be attached to the endpoint
    pub fn sends_bearer(&self, endpoint: &str) -> bool {
        let path = endpoint_path(endpoint);
        path != self.login_endpoint && path != self.refresh_endpoint
    }
}

fn endpoint_path(endpoint: &str) -> &str {
    endpoint.split(['?', '#']).next().unwrap_or(endpoint)
}

fn default_credential_path() -> PathBuf {
    let home = env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(".newsai").join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_endpoint_detection() {
        let config = AuthConfig::default();
        assert!(config.is_refresh_endpoint("/auth/refresh"));
        assert!(config.is_refresh_endpoint("/auth/refresh?refresh_token=abc"));
        // Other "refresh" routes are ordinary endpoints
        assert!(!config.is_refresh_endpoint("/news/refresh"));
    }

    #[test]
    fn test_bearer_policy() {
        let config = AuthConfig::default();
        assert!(!config.sends_bearer("/auth/login"));
        assert!(!config.sends_bearer("/auth/refresh?refresh_token=abc"));
        assert!(config.sends_bearer("/auth/me"));
        assert!(config.sends_bearer("/payments/verify"));
    }

    #[test]
    fn test_default_credential_path() {
        let config = AuthConfig::default();
        assert!(config.credential_path.ends_with(".newsai/session.json"));
    }
}
