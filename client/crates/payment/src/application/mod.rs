//! Application Layer
//!
//! Settlement orchestration, payment history and configuration.

pub mod config;
pub mod history;
pub mod settle;

// Re-exports
pub use config::PaymentConfig;
pub use history::{HistoryEntry, PaymentHistoryUseCase};
pub use settle::{Settlement, SettlementOrchestrator, SettlementOutcome};
