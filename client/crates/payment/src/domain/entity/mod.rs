//! Entity Module

pub mod intent;
pub mod transaction;
