//! Settlement Orchestrator
//!
//! Drives one plan purchase from intent creation through signing, chain
//! confirmation and backend verification.

use std::sync::Arc;

use kernel::error::api_error::ApiError;
use kernel::id::PaymentId;
use platform::retry::{RetryError, retry_with_backoff};

use crate::application::config::PaymentConfig;
use crate::domain::entity::{intent::PaymentIntent, transaction::PaymentTransaction};
use crate::domain::port::{
    ChainClient, PaymentGateway, ProfileRefresher, SignatureStatus, TransferRequest,
    VerifyRequest, Wallet,
};
use crate::domain::state::{SettlementObserver, SettlementState};
use crate::domain::value_object::{plan, signature::TransactionSignature};
use crate::error::{ChainError, PaymentError, PaymentResult};

/// A verified purchase
#[derive(Debug, Clone)]
pub struct Settlement {
    pub intent: PaymentIntent,
    pub signature: TransactionSignature,
    pub transaction: PaymentTransaction,
    /// Block explorer link (`None` in test mode)
    pub explorer_url: Option<String>,
}

/// How a purchase attempt ended, short of an error
#[derive(Debug, Clone)]
pub enum SettlementOutcome {
    Settled(Settlement),
    /// The user declined to sign; the intent was cancelled
    Cancelled { payment_id: PaymentId },
}

impl SettlementOutcome {
    pub fn is_settled(&self) -> bool {
        matches!(self, SettlementOutcome::Settled(_))
    }
}

/// Tracks the state of one attempt and reports transitions
struct Attempt<'a> {
    state: SettlementState,
    observer: Option<&'a dyn SettlementObserver>,
}

impl<'a> Attempt<'a> {
    fn new(observer: Option<&'a dyn SettlementObserver>) -> Self {
        Self {
            state: SettlementState::Idle,
            observer,
        }
    }

    fn advance(&mut self, next: SettlementState) -> PaymentResult<()> {
        let from = self.state;
        self.state = from.advance(next)?;
        tracing::debug!(from = %from, to = %next, "Settlement transition");
        if let Some(observer) = self.observer {
            observer.on_transition(from, next);
        }
        Ok(())
    }

    /// Move to `Failed` (unless already terminal) and hand the error back
    fn fail(&mut self, err: PaymentError) -> PaymentError {
        // Every non-terminal state may move to Failed
        if !self.state.is_terminal() {
            let from = self.state;
            self.state = SettlementState::Failed;
            tracing::debug!(from = %from, to = %self.state, "Settlement transition");
            if let Some(observer) = self.observer {
                observer.on_transition(from, SettlementState::Failed);
            }
        }
        err.log();
        err
    }
}

/// Reason a confirmation poll did not succeed
#[derive(Debug)]
enum PollError {
    Pending,
    Chain(ChainError),
}

/// Payment Settlement Orchestrator
///
/// Stateless across invocations: concurrent purchases are independent
/// attempts, and coalescing repeated clicks is left to the caller.
pub struct SettlementOrchestrator<G, W, C, P> {
    gateway: Arc<G>,
    wallet: Arc<W>,
    chain: Arc<C>,
    profile: Arc<P>,
    config: Arc<PaymentConfig>,
    observer: Option<Arc<dyn SettlementObserver>>,
}

impl<G, W, C, P> SettlementOrchestrator<G, W, C, P>
where
    G: PaymentGateway + Send + Sync + 'static,
    W: Wallet + Send + Sync + 'static,
    C: ChainClient + Send + Sync + 'static,
    P: ProfileRefresher + Send + Sync + 'static,
{
    pub fn new(
        gateway: Arc<G>,
        wallet: Arc<W>,
        chain: Arc<C>,
        profile: Arc<P>,
        config: Arc<PaymentConfig>,
    ) -> Self {
        Self {
            gateway,
            wallet,
            chain,
            profile,
            config,
            observer: None,
        }
    }

    /// Report every state transition to `observer`
    pub fn with_observer(mut self, observer: impl SettlementObserver + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    pub fn config(&self) -> &PaymentConfig {
        &self.config
    }

    /// Buy a plan: create an intent for its price and settle it
    pub async fn purchase(&self, plan_id: &str) -> PaymentResult<SettlementOutcome> {
        let mut attempt = Attempt::new(self.observer.as_deref());

        let intent = match self.open_intent(plan_id).await {
            Ok(intent) => intent,
            Err(err) => return Err(attempt.fail(err)),
        };
        if let Err(err) = attempt.advance(SettlementState::IntentCreated) {
            return Err(attempt.fail(err));
        }

        self.drive(&mut attempt, intent).await
    }

    /// Settle an intent created elsewhere
    pub async fn settle(&self, intent: PaymentIntent) -> PaymentResult<SettlementOutcome> {
        let mut attempt = Attempt::new(self.observer.as_deref());
        if let Err(err) = attempt.advance(SettlementState::IntentCreated) {
            return Err(attempt.fail(err));
        }
        self.drive(&mut attempt, intent).await
    }

    /// Create a checkout intent
    pub async fn create_intent(&self, amount: f64, plan_id: &str) -> PaymentResult<PaymentIntent> {
        let intent = self.gateway.create_intent(amount, plan_id).await?;
        tracing::info!(
            payment_id = %intent.payment_id,
            mode = %intent.mode,
            amount = intent.amount,
            "Payment intent created"
        );
        Ok(intent)
    }

    async fn open_intent(&self, plan_id: &str) -> PaymentResult<PaymentIntent> {
        let plan = plan::purchasable(plan_id)?;
        self.create_intent(plan.price_sol, plan.id).await
    }

    async fn drive(
        &self,
        attempt: &mut Attempt<'_>,
        intent: PaymentIntent,
    ) -> PaymentResult<SettlementOutcome> {
        match self.run(attempt, intent).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => Err(attempt.fail(err)),
        }
    }

    async fn run(
        &self,
        attempt: &mut Attempt<'_>,
        intent: PaymentIntent,
    ) -> PaymentResult<SettlementOutcome> {
        intent.lamports()?;

        let (signature, sender) = if intent.is_test() {
            attempt.advance(SettlementState::Simulating)?;
            tokio::time::sleep(self.config.test_settle_delay).await;
            let signature = TransactionSignature::new(intent.reference.clone())?;
            (signature, self.config.test_sender.clone())
        } else {
            attempt.advance(SettlementState::AwaitingSignature)?;
            match self.sign_live(&intent).await {
                Ok(signed) => signed,
                Err(PaymentError::Wallet(err)) if err.is_cancellation() => {
                    attempt.advance(SettlementState::Cancelled)?;
                    tracing::info!(payment_id = %intent.payment_id, "Payment cancelled by user");
                    self.cancel_quietly(&intent.payment_id).await;
                    return Ok(SettlementOutcome::Cancelled {
                        payment_id: intent.payment_id,
                    });
                }
                Err(err) => return Err(err),
            }
        };
        attempt.advance(SettlementState::Signed)?;

        attempt.advance(SettlementState::Confirming)?;
        if !intent.is_test() {
            self.await_confirmation(&signature).await?;
        }

        attempt.advance(SettlementState::Verifying)?;
        let request = VerifyRequest {
            signature: signature.as_str().to_string(),
            amount: intent.amount,
            sender_address: sender,
            payment_id: intent.payment_id.clone(),
        };
        let transaction = self.verify(&request).await?;
        if !transaction.is_completed() {
            return Err(PaymentError::VerificationRejected(format!(
                "transaction is {:?}",
                transaction.status
            )));
        }
        attempt.advance(SettlementState::Settled)?;

        tracing::info!(
            payment_id = %intent.payment_id,
            signature = %signature,
            test = intent.is_test(),
            "Payment settled"
        );
        self.refresh_profile_quietly().await;

        let explorer_url = signature.explorer_url(&self.config.explorer_cluster);
        Ok(SettlementOutcome::Settled(Settlement {
            intent,
            signature,
            transaction,
            explorer_url,
        }))
    }

    /// Build the transfer and have the wallet sign and submit it
    async fn sign_live(
        &self,
        intent: &PaymentIntent,
    ) -> PaymentResult<(TransactionSignature, String)> {
        let to = intent.recipient()?;
        let lamports = intent.lamports()?;
        if lamports.is_zero() {
            return Err(PaymentError::InvalidAmount(format!("{} SOL", intent.amount)));
        }

        let from = self.wallet.public_key().await?;
        let recent_blockhash = self.chain.latest_blockhash().await?;
        let transfer = TransferRequest {
            from: from.clone(),
            to,
            lamports,
            recent_blockhash,
        };

        let signature = self.wallet.sign_and_send(&transfer).await?;
        tracing::info!(payment_id = %intent.payment_id, signature = %signature, "Transaction submitted");
        Ok((signature, from.to_string()))
    }

    /// Poll the chain until the signature is confirmed
    ///
    /// Transient RPC failures and "not yet confirmed" answers are polled
    /// again until the confirmation deadline; an on-chain failure is final.
    async fn await_confirmation(&self, signature: &TransactionSignature) -> PaymentResult<()> {
        let chain = &self.chain;
        let policy = &self.config.confirmation;

        let result = retry_with_backoff(
            policy,
            || async move {
                match chain.signature_status(signature).await {
                    Ok(status) if status.is_confirmed() => Ok(()),
                    Ok(SignatureStatus::Failed(reason)) => {
                        Err(PollError::Chain(ChainError::TransactionFailed(reason)))
                    }
                    Ok(_) => Err(PollError::Pending),
                    Err(err) => Err(PollError::Chain(err)),
                }
            },
            |err| match err {
                PollError::Pending => true,
                PollError::Chain(err) => err.is_transient(),
            },
        )
        .await;

        let timeout = || PaymentError::ConfirmationTimeout {
            signature: signature.to_string(),
            waited: policy.deadline,
        };
        match result {
            Ok(()) => Ok(()),
            Err(RetryError::Failed {
                error: PollError::Chain(err),
                ..
            }) => Err(err.into()),
            Err(RetryError::Failed {
                error: PollError::Pending,
                ..
            })
            | Err(RetryError::DeadlineExceeded { .. }) => Err(timeout()),
        }
    }

    /// Verify with the backend
    ///
    /// Only transport failures are retried. If a retry is refused after an
    /// earlier attempt may have reached the backend, the recorded status of
    /// the signature decides.
    async fn verify(&self, request: &VerifyRequest) -> PaymentResult<PaymentTransaction> {
        let gateway = &self.gateway;

        let result = retry_with_backoff(
            &self.config.verify_retry,
            || async move { gateway.verify(request).await },
            PaymentError::is_network,
        )
        .await;

        match result {
            Ok(transaction) => Ok(transaction),
            Err(RetryError::Failed { error, attempts }) => {
                if attempts > 1 && matches!(error, PaymentError::VerificationRejected(_)) {
                    if let Some(transaction) = self.reconcile(request).await {
                        return Ok(transaction);
                    }
                }
                Err(error)
            }
            Err(RetryError::DeadlineExceeded { last_error, .. }) => {
                Err(last_error.unwrap_or_else(|| {
                    ApiError::network("Verification timed out").into()
                }))
            }
        }
    }

    /// Completed transaction already recorded for this payment, if any
    async fn reconcile(&self, request: &VerifyRequest) -> Option<PaymentTransaction> {
        match self.gateway.transaction_status(&request.signature).await {
            Ok(Some(transaction))
                if transaction.is_completed()
                    && transaction
                        .payment_id
                        .as_ref()
                        .is_none_or(|id| *id == request.payment_id) =>
            {
                tracing::info!(
                    payment_id = %request.payment_id,
                    "Verification already recorded by an earlier attempt"
                );
                Some(transaction)
            }
            Ok(_) => None,
            Err(err) => {
                tracing::warn!(error = %err, "Could not reconcile verification status");
                None
            }
        }
    }

    async fn cancel_quietly(&self, payment_id: &PaymentId) {
        if let Err(err) = self.gateway.cancel(payment_id).await {
            tracing::warn!(payment_id = %payment_id, error = %err, "Failed to cancel payment intent");
        }
    }

    async fn refresh_profile_quietly(&self) {
        if let Err(err) = self.profile.refresh_profile().await {
            tracing::warn!(error = %err, "Profile refresh after settlement failed");
        }
    }
}

