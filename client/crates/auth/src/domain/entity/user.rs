//! User Entities
//!
//! Profile and usage snapshots returned by `/auth/me` and `/auth/me/usage`.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

/// Signed-in user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default, with = "kernel::time::lenient_option")]
    pub premium_expiry: Option<DateTime<Utc>>,
    /// Remaining manual feed refreshes
    #[serde(default)]
    pub refresh_tokens: i64,
}

impl UserProfile {
    /// Name to greet the user with
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }

    /// Premium entitlement that has not lapsed
    pub fn has_active_premium(&self) -> bool {
        self.is_premium && self.premium_expiry.is_none_or(|expiry| expiry > Utc::now())
    }
}

/// Token consumption counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageStats {
    pub total_tokens: i64,
    pub daily_tokens: i64,
    pub request_count: i64,
    pub limit_daily: i64,
    #[serde(default)]
    pub refresh_tokens: Option<i64>,
    #[serde(default)]
    pub news_refresh_available: Option<bool>,
    #[serde(default)]
    pub summary_refresh_available: Option<bool>,
}

impl UsageStats {
    /// Share of today's allowance consumed, clamped to `0.0..=1.0`
    pub fn daily_fraction(&self) -> f64 {
        if self.limit_daily <= 0 {
            return 1.0;
        }
        (self.daily_tokens as f64 / self.limit_daily as f64).clamp(0.0, 1.0)
    }

    pub fn daily_remaining(&self) -> i64 {
        (self.limit_daily - self.daily_tokens).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_backend_shape() {
        let json = r#"{
            "id": "7f9c0c1e-1111-2222-3333-444455556666",
            "email": "reader@example.com",
            "full_name": null,
            "is_premium": true,
            "premium_expiry": "2099-01-01T00:00:00.000000",
            "refresh_tokens": 3
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.display_name(), "reader@example.com");
        assert!(profile.has_active_premium());
        assert_eq!(profile.refresh_tokens, 3);
    }

    #[test]
    fn test_expired_premium() {
        let json = r#"{"id":"u","email":"a@b.co","is_premium":true,"premium_expiry":"2000-01-01T00:00:00"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert!(!profile.has_active_premium());
    }

    #[test]
    fn test_usage_fraction() {
        let usage = UsageStats {
            total_tokens: 5000,
            daily_tokens: 250,
            request_count: 12,
            limit_daily: 1000,
            refresh_tokens: None,
            news_refresh_available: None,
            summary_refresh_available: None,
        };
        assert_eq!(usage.daily_fraction(), 0.25);
        assert_eq!(usage.daily_remaining(), 750);
    }
}
