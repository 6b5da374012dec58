//! Token Pair Value Object
//!
//! Body returned by the login and refresh endpoints.

use std::fmt;

use serde::Deserialize;

/// `{access_token, refresh_token?, token_type?}`
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("token_type", &self.token_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_token_is_optional() {
        let pair: TokenPair = serde_json::from_str(r#"{"access_token":"a"}"#).unwrap();
        assert_eq!(pair.access_token, "a");
        assert!(pair.refresh_token.is_none());
    }

    #[test]
    fn test_missing_access_token_is_rejected() {
        assert!(serde_json::from_str::<TokenPair>(r#"{"refresh_token":"r"}"#).is_err());
    }
}
