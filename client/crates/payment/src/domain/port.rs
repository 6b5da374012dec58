//! Port Traits
//!
//! Seams to the backend, the user's wallet, the chain and the session.
//! Implementations are in the infrastructure layer (or supplied by the host
//! application, for the wallet).

use kernel::error::api_error::ApiError;
use kernel::id::PaymentId;
use serde::Serialize;

use crate::domain::entity::{intent::PaymentIntent, transaction::PaymentTransaction};
use crate::domain::value_object::{
    lamports::Lamports, signature::TransactionSignature, wallet_address::WalletAddress,
};
use crate::error::{ChainError, PaymentResult, WalletError};

/// Body of the backend verify call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifyRequest {
    #[serde(rename = "transaction_signature")]
    pub signature: String,
    pub amount: f64,
    pub sender_address: String,
    pub payment_id: PaymentId,
}

/// Native-asset transfer to be signed and submitted by the wallet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub from: WalletAddress,
    pub to: WalletAddress,
    pub lamports: Lamports,
    pub recent_blockhash: String,
}

/// Confirmation status of a submitted signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureStatus {
    /// Not yet seen by the queried node
    NotFound,
    Processed,
    Confirmed,
    Finalized,
    /// The transaction landed but failed
    Failed(String),
}

impl SignatureStatus {
    /// Confirmed at the commitment the orchestrator waits for
    pub fn is_confirmed(&self) -> bool {
        matches!(self, SignatureStatus::Confirmed | SignatureStatus::Finalized)
    }
}

/// Backend payment endpoints
#[trait_variant::make(PaymentGateway: Send)]
pub trait LocalPaymentGateway {
    /// Create a checkout intent for a plan
    async fn create_intent(&self, amount: f64, plan_id: &str) -> PaymentResult<PaymentIntent>;

    /// Verify a signed payment; idempotent on `payment_id`
    async fn verify(&self, request: &VerifyRequest) -> PaymentResult<PaymentTransaction>;

    /// Cancel a pending intent
    async fn cancel(&self, payment_id: &PaymentId) -> PaymentResult<()>;

    async fn history(&self) -> PaymentResult<Vec<PaymentTransaction>>;

    /// Look up the verification recorded for a signature, if any
    async fn transaction_status(
        &self,
        signature: &str,
    ) -> PaymentResult<Option<PaymentTransaction>>;
}

/// The user's wallet
#[trait_variant::make(Wallet: Send)]
pub trait LocalWallet {
    async fn public_key(&self) -> Result<WalletAddress, WalletError>;

    /// Ask the user to sign the transfer and submit it
    async fn sign_and_send(
        &self,
        transfer: &TransferRequest,
    ) -> Result<TransactionSignature, WalletError>;
}

/// Chain RPC
#[trait_variant::make(ChainClient: Send)]
pub trait LocalChainClient {
    async fn latest_blockhash(&self) -> Result<String, ChainError>;

    async fn signature_status(
        &self,
        signature: &TransactionSignature,
    ) -> Result<SignatureStatus, ChainError>;
}

/// Re-fetches the signed-in profile so new entitlements show up
#[trait_variant::make(ProfileRefresher: Send)]
pub trait LocalProfileRefresher {
    async fn refresh_profile(&self) -> Result<(), ApiError>;
}
