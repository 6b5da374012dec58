//! Wallet Address Value Object
//!
//! A base58-encoded 32-byte public key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PaymentError, PaymentResult};

/// Bitcoin-style base58 alphabet (no 0, O, I, l)
const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Encoded length bounds of a 32-byte key
const MIN_LEN: usize = 32;
const MAX_LEN: usize = 44;

/// Public key of a wallet or merchant account
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn new(address: impl Into<String>) -> PaymentResult<Self> {
        let address = address.into().trim().to_string();

        if !(MIN_LEN..=MAX_LEN).contains(&address.len()) {
            return Err(PaymentError::InvalidAddress(format!(
                "expected {MIN_LEN}-{MAX_LEN} characters, got {}",
                address.len()
            )));
        }
        if let Some(c) = address.chars().find(|c| !BASE58_ALPHABET.contains(*c)) {
            return Err(PaymentError::InvalidAddress(format!(
                "invalid base58 character '{c}'"
            )));
        }

        Ok(Self(address))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = PaymentError;

    fn try_from(value: String) -> PaymentResult<Self> {
        Self::new(value)
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
