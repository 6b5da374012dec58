//! Transaction Signature Value Object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PaymentError, PaymentResult};

/// Prefix of simulated signatures issued in test mode
pub const TEST_SIGNATURE_PREFIX: &str = "TEST-";

/// Chain transaction signature (or a test-mode reference)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionSignature(String);

impl TransactionSignature {
    pub fn new(signature: impl Into<String>) -> PaymentResult<Self> {
        let signature = signature.into();
        if signature.trim().is_empty() {
            return Err(PaymentError::InvalidSignature);
        }
        Ok(Self(signature))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Simulated signature from test mode
    pub fn is_test(&self) -> bool {
        self.0.starts_with(TEST_SIGNATURE_PREFIX)
    }

    /// Block explorer link; `None` for simulated signatures
    pub fn explorer_url(&self, cluster: &str) -> Option<String> {
        if self.is_test() {
            return None;
        }
        Some(format!(
            "https://explorer.solana.com/tx/{}?cluster={}",
            self.0, cluster
        ))
    }
}

impl fmt::Display for TransactionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_signature_rejected() {
        assert!(TransactionSignature::new("  ").is_err());
    }

    #[test]
    fn test_explorer_url() {
        let sig = TransactionSignature::new("5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnb").unwrap();
        assert_eq!(
            sig.explorer_url("devnet").as_deref(),
            Some("https://explorer.solana.com/tx/5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnb?cluster=devnet")
        );

        let test_sig = TransactionSignature::new("TEST-abc").unwrap();
        assert!(test_sig.is_test());
        assert!(test_sig.explorer_url("devnet").is_none());
    }
}
