//! Payment Mode Value Object

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Settlement mode chosen by the backend per intent
///
/// Wire values are `"TEST"` and anything else; every non-test value
/// (`"LIVE"`, `"REAL"`, ...) means real on-chain settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMode {
    /// Simulated signing, no chain interaction
    Test,
    /// Real transfer signed by the user's wallet
    Live,
}

impl PaymentMode {
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("TEST") {
            PaymentMode::Test
        } else {
            PaymentMode::Live
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMode::Test => "TEST",
            PaymentMode::Live => "LIVE",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PaymentMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaymentMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(|s| PaymentMode::parse(&s))
    }
}
