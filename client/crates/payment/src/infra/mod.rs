//! Infrastructure Layer
//!
//! Backend gateway, chain RPC client and adapters for the other ports.

pub mod http_gateway;
pub mod no_wallet;
pub mod profile;
pub mod solana_rpc;

pub use http_gateway::HttpPaymentGateway;
pub use no_wallet::NoWallet;
pub use profile::AuthProfileRefresher;
pub use solana_rpc::SolanaRpcClient;
