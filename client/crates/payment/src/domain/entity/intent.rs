//! Payment Intent Entity

use kernel::id::PaymentId;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{
    lamports::Lamports, payment_mode::PaymentMode, wallet_address::WalletAddress,
};
use crate::error::PaymentResult;

/// Server-side checkout attempt
///
/// `payment_id` is the idempotency key for the verify call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub payment_id: PaymentId,
    pub mode: PaymentMode,
    /// Merchant address (a placeholder in test mode)
    pub address: String,
    /// Test-mode signature; unique per intent
    pub reference: String,
    /// Amount in SOL
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

pub(crate) fn default_currency() -> String {
    "SOL".to_string()
}

impl PaymentIntent {
    pub fn is_test(&self) -> bool {
        self.mode == PaymentMode::Test
    }

    pub fn lamports(&self) -> PaymentResult<Lamports> {
        Lamports::from_sol(self.amount)
    }

    /// Recipient for a real transfer
    pub fn recipient(&self) -> PaymentResult<WalletAddress> {
        WalletAddress::new(self.address.clone())
    }
}
