//! Payment Error Types
//!
//! Payment-specific error variants that integrate with the unified
//! `kernel::ApiError` system. Wallet and chain failures get their own enums
//! so they can be classified before they surface.

use std::time::Duration;

use kernel::error::{api_error::ApiError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::state::SettlementState;

/// Payment-specific result type alias
pub type PaymentResult<T> = Result<T, PaymentError>;

/// Failures reported by the wallet while signing/submitting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// The user declined to sign
    #[error("Transaction cancelled by user")]
    UserRejected,

    /// The wallet popup was closed before an answer
    #[error("Wallet popup closed")]
    PopupClosed,

    /// No wallet is connected
    #[error("No wallet connected")]
    Unavailable,

    #[error("Wallet error: {0}")]
    Other(String),
}

impl WalletError {
    /// Classify a wallet adapter's error name/message
    pub fn classify(name: &str, message: &str) -> Self {
        if message.contains("User rejected") || name == "WalletSignTransactionError" {
            WalletError::UserRejected
        } else if message.contains("Plugin Closed") {
            WalletError::PopupClosed
        } else if name == "WalletNotConnectedError" || name == "WalletNotReadyError" {
            WalletError::Unavailable
        } else {
            WalletError::Other(message.to_string())
        }
    }

    /// Only a user rejection counts as a cancellation
    pub fn is_cancellation(&self) -> bool {
        matches!(self, WalletError::UserRejected)
    }
}

/// Failures reported by the chain or its RPC endpoint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// The network reports the transaction itself failed
    #[error("Transaction failed on chain: {0}")]
    TransactionFailed(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("RPC transport error: {0}")]
    Transport(String),

    #[error("Unexpected RPC response: {0}")]
    InvalidResponse(String),
}

impl ChainError {
    /// Whether polling may continue after this error
    pub fn is_transient(&self) -> bool {
        matches!(self, ChainError::Transport(_) | ChainError::Rpc { .. })
    }
}

/// Payment-specific error variants
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The backend declined to create an intent (e.g. invalid plan)
    #[error("Payment intent rejected: {0}")]
    IntentRejected(String),

    #[error("Unknown plan: {0}")]
    UnknownPlan(String),

    /// Free plans are never purchased
    #[error("You are already on the {0} plan")]
    PlanNotPurchasable(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid wallet address: {0}")]
    InvalidAddress(String),

    #[error("Invalid transaction signature")]
    InvalidSignature,

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    /// Confirmation did not arrive before the deadline
    #[error("Timed out after {waited:?} waiting for confirmation of {signature}")]
    ConfirmationTimeout { signature: String, waited: Duration },

    /// The backend refused the verification (including duplicates)
    #[error("Verification rejected: {0}")]
    VerificationRejected(String),

    #[error("Invalid settlement transition: {from} -> {to}")]
    InvalidTransition {
        from: SettlementState,
        to: SettlementState,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl PaymentError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PaymentError::IntentRejected(_)
            | PaymentError::InvalidAmount(_)
            | PaymentError::InvalidAddress(_)
            | PaymentError::InvalidSignature
            | PaymentError::VerificationRejected(_) => ErrorKind::BadRequest,
            PaymentError::UnknownPlan(_) => ErrorKind::NotFound,
            PaymentError::PlanNotPurchasable(_) => ErrorKind::Conflict,
            PaymentError::Wallet(WalletError::UserRejected) => ErrorKind::BadRequest,
            PaymentError::Wallet(_) => ErrorKind::ServiceUnavailable,
            PaymentError::Chain(ChainError::TransactionFailed(_)) => ErrorKind::PaymentRequired,
            PaymentError::Chain(_) => ErrorKind::BadGateway,
            PaymentError::ConfirmationTimeout { .. } => ErrorKind::RequestTimeout,
            PaymentError::InvalidTransition { .. } => ErrorKind::InternalServerError,
            PaymentError::Api(e) => e.kind(),
        }
    }

    /// Transport-level failure talking to the backend
    pub fn is_network(&self) -> bool {
        matches!(self, PaymentError::Api(e) if e.is_network())
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            PaymentError::InvalidTransition { from, to } => {
                tracing::error!(from = %from, to = %to, "Settlement state machine violated");
            }
            PaymentError::Chain(e) => {
                tracing::error!(error = %e, "Chain error");
            }
            PaymentError::ConfirmationTimeout { signature, waited } => {
                tracing::warn!(signature = %signature, waited_ms = waited.as_millis() as u64, "Confirmation timed out");
            }
            PaymentError::VerificationRejected(msg) => {
                tracing::warn!(message = %msg, "Verification rejected");
            }
            PaymentError::Api(e) if e.is_network() || e.is_server_error() => {
                tracing::error!(error = %e, "Payment request failed");
            }
            _ => {
                tracing::debug!(error = %self, "Payment error");
            }
        }
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Api(e) => e,
            other => ApiError::from_kind(other.kind(), other.to_string()),
        }
    }
}
