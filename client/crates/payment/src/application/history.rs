//! Payment History Use Case

use std::sync::Arc;

use crate::application::config::PaymentConfig;
use crate::domain::entity::transaction::PaymentTransaction;
use crate::domain::port::PaymentGateway;
use crate::domain::value_object::signature::TransactionSignature;
use crate::error::PaymentResult;

/// One history row with its explorer link
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub transaction: PaymentTransaction,
    pub explorer_url: Option<String>,
}

/// Payment history use case
pub struct PaymentHistoryUseCase<G> {
    gateway: Arc<G>,
    config: Arc<PaymentConfig>,
}

impl<G> PaymentHistoryUseCase<G>
where
    G: PaymentGateway + Send + Sync,
{
    pub fn new(gateway: Arc<G>, config: Arc<PaymentConfig>) -> Self {
        Self { gateway, config }
    }

    /// Past payments, newest first
    pub async fn execute(&self) -> PaymentResult<Vec<HistoryEntry>> {
        let mut transactions = self.gateway.history().await?;
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(transactions
            .into_iter()
            .map(|transaction| {
                let explorer_url = TransactionSignature::new(transaction.signature.clone())
                    .ok()
                    .and_then(|sig| sig.explorer_url(&self.config.explorer_cluster));
                HistoryEntry {
                    transaction,
                    explorer_url,
                }
            })
            .collect())
    }
}
