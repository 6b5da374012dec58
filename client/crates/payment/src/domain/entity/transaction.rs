//! Payment Transaction Entity

use chrono::{DateTime, Utc};
use kernel::id::PaymentId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::intent::default_currency;
use crate::domain::value_object::signature::TEST_SIGNATURE_PREFIX;

/// Verification status recorded by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    /// Completed and failed transactions never change again
    pub fn is_final(self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

/// Verified payment, as returned by verify / history / status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentTransaction {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "transaction_signature")]
    pub signature: String,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub sender_address: Option<String>,
    #[serde(default)]
    pub payment_id: Option<PaymentId>,
    pub status: TransactionStatus,
    #[serde(default)]
    pub is_test: Option<bool>,
    #[serde(default, with = "kernel::time::lenient_option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl PaymentTransaction {
    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }

    /// Test-mode transaction; older records lack the flag
    pub fn is_test(&self) -> bool {
        self.is_test
            .unwrap_or_else(|| self.signature.starts_with(TEST_SIGNATURE_PREFIX))
    }
}
