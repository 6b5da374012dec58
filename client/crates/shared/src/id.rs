//! Common ID Types
//!
//! Type-safe wrappers for identifiers issued by the backend.
//! The client never mints these; it only carries them between calls.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type PaymentId = Id<markers::Payment>;
/// let id = PaymentId::new("p1");
/// assert_eq!(id.as_str(), "p1");
/// ```
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Wrap a server-issued identifier
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Convert into the owned string
    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> From<String> for Id<T> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<T> From<&str> for Id<T> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for payment intent IDs (the verify idempotency key)
    pub struct Payment;

    /// Marker for news article IDs
    pub struct Article;

    /// Marker for user IDs
    pub struct User;
}

/// Type aliases for common IDs
pub type PaymentId = Id<markers::Payment>;
pub type ArticleId = Id<markers::Article>;
pub type UserId = Id<markers::User>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_type_safety() {
        let payment_id: PaymentId = Id::new("p1");
        let article_id: ArticleId = Id::new("p1");

        // Same text, different types: cannot be compared or mixed
        assert_eq!(payment_id.as_str(), article_id.as_str());
    }

    #[test]
    fn test_id_serde_is_transparent() {
        let id = PaymentId::new("pay_123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"pay_123\"");

        let parsed: PaymentId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_display() {
        let id = UserId::from("user-1");
        assert_eq!(id.to_string(), "user-1");
        assert_eq!(format!("{:?}", id), "Id(user-1)");
    }
}
