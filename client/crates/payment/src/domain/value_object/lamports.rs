//! Lamports Value Object
//!
//! The chain's base unit. 1 SOL = 1_000_000_000 lamports.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PaymentError, PaymentResult};

/// Lamports per SOL
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Native-asset amount in base units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lamports(u64);

impl Lamports {
    pub const ZERO: Lamports = Lamports(0);

    pub const fn new(lamports: u64) -> Self {
        Self(lamports)
    }

    /// Convert a SOL amount, rounding to the nearest lamport
    pub fn from_sol(sol: f64) -> PaymentResult<Self> {
        if !sol.is_finite() || sol < 0.0 {
            return Err(PaymentError::InvalidAmount(format!("{sol} SOL")));
        }
        let lamports = (sol * LAMPORTS_PER_SOL as f64).round();
        if lamports > u64::MAX as f64 {
            return Err(PaymentError::InvalidAmount(format!("{sol} SOL")));
        }
        Ok(Self(lamports as u64))
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub fn as_sol(self) -> f64 {
        self.0 as f64 / LAMPORTS_PER_SOL as f64
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Lamports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} SOL", self.as_sol())
    }
}
