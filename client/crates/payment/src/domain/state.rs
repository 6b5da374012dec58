//! Settlement State Machine
//!
//! One instance per purchase attempt:
//!
//! ```text
//! Idle -> IntentCreated -> Simulating (TEST)        -> Signed -> Confirming -> Verifying -> Settled
//!                       -> AwaitingSignature (LIVE) ->
//! ```
//!
//! `Cancelled` and `Failed` are terminal. `Cancelled` is only reachable
//! while waiting for the wallet.

use std::fmt;

use serde::Serialize;

use crate::error::{PaymentError, PaymentResult};

/// Settlement progress of one purchase attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementState {
    Idle,
    IntentCreated,
    Simulating,
    AwaitingSignature,
    Signed,
    Confirming,
    Verifying,
    Settled,
    Cancelled,
    Failed,
}

impl SettlementState {
    /// Whether `next` is a legal successor of `self`
    pub fn can_advance_to(self, next: SettlementState) -> bool {
        use SettlementState::*;

        if self.is_terminal() {
            return false;
        }
        match (self, next) {
            (_, Failed) => true,
            (Idle, IntentCreated) => true,
            (IntentCreated, Simulating | AwaitingSignature) => true,
            (Simulating, Signed) => true,
            (AwaitingSignature, Signed | Cancelled) => true,
            (Signed, Confirming) => true,
            (Confirming, Verifying) => true,
            (Verifying, Settled) => true,
            _ => false,
        }
    }

    /// Validated transition
    pub fn advance(self, next: SettlementState) -> PaymentResult<SettlementState> {
        if self.can_advance_to(next) {
            Ok(next)
        } else {
            Err(PaymentError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SettlementState::Settled | SettlementState::Cancelled | SettlementState::Failed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SettlementState::Idle => "idle",
            SettlementState::IntentCreated => "intent_created",
            SettlementState::Simulating => "simulating",
            SettlementState::AwaitingSignature => "awaiting_signature",
            SettlementState::Signed => "signed",
            SettlementState::Confirming => "confirming",
            SettlementState::Verifying => "verifying",
            SettlementState::Settled => "settled",
            SettlementState::Cancelled => "cancelled",
            SettlementState::Failed => "failed",
        }
    }
}

impl fmt::Display for SettlementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives every settlement transition (UI progress)
pub trait SettlementObserver: Send + Sync {
    fn on_transition(&self, from: SettlementState, to: SettlementState);
}

impl<F> SettlementObserver for F
where
    F: Fn(SettlementState, SettlementState) + Send + Sync,
{
    fn on_transition(&self, from: SettlementState, to: SettlementState) {
        self(from, to)
    }
}
