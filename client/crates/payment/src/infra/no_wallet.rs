//! Wallet placeholder for hosts without a wallet bridge

use crate::domain::port::{TransferRequest, Wallet};
use crate::domain::value_object::{signature::TransactionSignature, wallet_address::WalletAddress};
use crate::error::WalletError;

/// Reports every request as "no wallet connected"
///
/// Test-mode purchases never touch the wallet, so they still settle.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWallet;

impl Wallet for NoWallet {
    async fn public_key(&self) -> Result<WalletAddress, WalletError> {
        Err(WalletError::Unavailable)
    }

    async fn sign_and_send(
        &self,
        _transfer: &TransferRequest,
    ) -> Result<TransactionSignature, WalletError> {
        Err(WalletError::Unavailable)
    }
}
