//! Payment Settlement Module
//!
//! Clean Architecture structure:
//! - `domain/` - Intent and transaction entities, value objects, settlement
//!   state machine, gateway / wallet / chain / profile ports
//! - `application/` - Settlement orchestrator, payment history, configuration
//! - `infra/` - HTTP gateway, Solana JSON-RPC client, port adapters
//!
//! ## Settlement Flow
//! - TEST intents: simulated signing delay, the intent reference is the signature
//! - LIVE intents: wallet signs a native transfer, the chain is polled for
//!   confirmation within a deadline
//! - Both: backend verification (idempotent on `payment_id`), then a
//!   best-effort profile refresh

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::{
    HistoryEntry, PaymentConfig, PaymentHistoryUseCase, Settlement, SettlementOrchestrator,
    SettlementOutcome,
};
pub use domain::{
    PaymentIntent, PaymentMode, PaymentTransaction, SettlementState, TransactionStatus,
};
pub use error::{ChainError, PaymentError, PaymentResult, WalletError};
pub use infra::{AuthProfileRefresher, HttpPaymentGateway, NoWallet, SolanaRpcClient};
