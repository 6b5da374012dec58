//! Session Entity
//!
//! The active access/refresh credential pair.
//! Written on login and on every successful refresh, cleared on logout or
//! when a refresh is rejected.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_object::token_pair::TokenPair;

/// Stored credential pair
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer credential attached to every call except login/refresh
    pub access_token: String,
    /// Sent only to the refresh endpoint
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Access token expiry, when known
    #[serde(default, with = "kernel::time::lenient_option")]
    pub expiry: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            expiry: None,
        }
    }

    /// Session issued by a login response
    pub fn from_token_pair(pair: TokenPair) -> Self {
        Self::new(pair.access_token, pair.refresh_token)
    }

    /// Session after a refresh
    ///
    /// The previous refresh token is kept when the response carries none.
    pub fn refreshed(&self, pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token.or_else(|| self.refresh_token.clone()),
            expiry: None,
        }
    }

    pub fn with_expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Whether a refresh can be attempted
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Check if the access token is known to be expired
    pub fn is_expired(&self) -> bool {
        self.expiry.is_some_and(|expiry| Utc::now() >= expiry)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("expiry", &self.expiry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn pair(access: &str, refresh: Option<&str>) -> TokenPair {
        TokenPair {
            access_token: access.to_string(),
            refresh_token: refresh.map(str::to_string),
            token_type: Some("bearer".to_string()),
        }
    }

    #[test]
    fn test_refreshed_keeps_old_refresh_token() {
        let session = Session::from_token_pair(pair("a1", Some("r1")));
        let next = session.refreshed(pair("a2", None));
        assert_eq!(next.access_token, "a2");
        assert_eq!(next.refresh_token.as_deref(), Some("r1"));
    }

    #[test]
    fn test_refreshed_rotates_refresh_token() {
        let session = Session::from_token_pair(pair("a1", Some("r1")));
        let next = session.refreshed(pair("a2", Some("r2")));
        assert_eq!(next.refresh_token.as_deref(), Some("r2"));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let session = Session::new("secret-access", Some("secret-refresh".to_string()));
        let debug = format!("{:?}", session);
        assert!(!debug.contains("secret-access"));
        assert!(!debug.contains("secret-refresh"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_can_refresh() {
        assert!(Session::new("a", Some("r".into())).can_refresh());
        assert!(!Session::new("a", None).can_refresh());
        assert!(!Session::new("a", Some(String::new())).can_refresh());
    }

    #[test]
    fn test_expiry() {
        let session = Session::new("a", None);
        assert!(!session.is_expired());

        let session = Session::new("a", None).with_expiry(Utc::now() - Duration::seconds(1));
        assert!(session.is_expired());
    }

    #[test]
    fn test_serde_roundtrip_of_stored_form() {
        let json = r#"{"access_token":"a","refresh_token":null}"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session, Session::new("a", None));
    }
}
