//! Value Object Module

pub mod lamports;
pub mod payment_mode;
pub mod plan;
pub mod signature;
pub mod wallet_address;
