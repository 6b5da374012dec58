//! HTTP Payment Gateway
//!
//! `PaymentGateway` over the authenticated request pipeline.

use std::sync::Arc;

use auth::domain::CredentialStore;
use auth::{RequestOptions, RequestPipeline};
use kernel::error::api_error::ApiError;
use kernel::error::kind::ErrorKind;
use kernel::id::PaymentId;
use serde_json::{Value, json};

use crate::application::config::PaymentConfig;
use crate::domain::entity::{intent::PaymentIntent, transaction::PaymentTransaction};
use crate::domain::port::{PaymentGateway, VerifyRequest};
use crate::error::{PaymentError, PaymentResult};

/// Backend payment endpoints
pub struct HttpPaymentGateway<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pipeline: RequestPipeline<S>,
    config: Arc<PaymentConfig>,
}

impl<S> HttpPaymentGateway<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pub fn new(pipeline: RequestPipeline<S>, config: Arc<PaymentConfig>) -> Self {
        Self { pipeline, config }
    }
}

/// A refusal by the backend, as opposed to an auth or transport failure
fn is_refusal(err: &ApiError) -> bool {
    err.is_client_error() && !err.is_auth_failure()
}

impl<S> PaymentGateway for HttpPaymentGateway<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    async fn create_intent(&self, amount: f64, plan_id: &str) -> PaymentResult<PaymentIntent> {
        let body = json!({ "amount": amount, "plan": plan_id });
        self.pipeline
            .post_json(&self.config.create_endpoint, &body)
            .await
            .map_err(|e| {
                if is_refusal(&e) {
                    PaymentError::IntentRejected(e.message().to_string())
                } else {
                    PaymentError::Api(e)
                }
            })
    }

    async fn verify(&self, request: &VerifyRequest) -> PaymentResult<PaymentTransaction> {
        self.pipeline
            .post_json(&self.config.verify_endpoint, request)
            .await
            .map_err(|e| {
                if is_refusal(&e) {
                    PaymentError::VerificationRejected(e.message().to_string())
                } else {
                    PaymentError::Api(e)
                }
            })
    }

    async fn cancel(&self, payment_id: &PaymentId) -> PaymentResult<()> {
        let body = json!({ "payment_id": payment_id });
        let _: Value = self
            .pipeline
            .post_json(&self.config.cancel_endpoint, &body)
            .await?;
        Ok(())
    }

    async fn history(&self) -> PaymentResult<Vec<PaymentTransaction>> {
        Ok(self.pipeline.get(&self.config.history_endpoint).await?)
    }

    async fn transaction_status(
        &self,
        signature: &str,
    ) -> PaymentResult<Option<PaymentTransaction>> {
        let options =
            RequestOptions::get(self.config.status_endpoint.as_str()).query("signature", signature);
        match self.pipeline.send_as(&options).await {
            Ok(transaction) => Ok(Some(transaction)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
