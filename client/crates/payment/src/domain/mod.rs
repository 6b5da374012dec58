//! Domain Layer
//!
//! Contains entities, value objects, the settlement state machine and the
//! port traits.

pub mod entity;
pub mod port;
pub mod state;
pub mod value_object;

// Re-exports
pub use entity::{
    intent::PaymentIntent,
    transaction::{PaymentTransaction, TransactionStatus},
};
pub use port::{
    ChainClient, PaymentGateway, ProfileRefresher, SignatureStatus, TransferRequest,
    VerifyRequest, Wallet,
};
pub use state::{SettlementObserver, SettlementState};
pub use value_object::{
    lamports::Lamports, payment_mode::PaymentMode, plan::Plan,
    signature::TransactionSignature, wallet_address::WalletAddress,
};
