//! Solana JSON-RPC Client
//!
//! Minimal `ChainClient` over plain JSON-RPC 2.0.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::domain::port::{ChainClient, SignatureStatus};
use crate::domain::value_object::signature::TransactionSignature;
use crate::error::ChainError;

/// Commitment level the orchestrator waits for
const COMMITMENT: &str = "confirmed";

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockhashValue {
    blockhash: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusValue {
    #[serde(default)]
    confirmation_status: Option<String>,
    #[serde(default)]
    err: Option<Value>,
}

/// JSON-RPC chain client
pub struct SolanaRpcClient {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
    next_id: AtomicU64,
}

impl SolanaRpcClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self::with_http_client(reqwest::Client::new(), url, timeout)
    }

    pub fn with_http_client(http: reqwest::Client, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            url: url.into(),
            timeout,
            next_id: AtomicU64::new(1),
        }
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChainError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ChainError::Transport(format!("HTTP {status}")));
        }

        let payload: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| ChainError::InvalidResponse(e.to_string()))?;

        if let Some(error) = payload.error {
            tracing::debug!(method, code = error.code, "RPC error");
            return Err(ChainError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        payload
            .result
            .ok_or_else(|| ChainError::InvalidResponse(format!("{method}: missing result")))
    }
}

impl ChainClient for SolanaRpcClient {
    async fn latest_blockhash(&self) -> Result<String, ChainError> {
        let result: WithContext<BlockhashValue> = self
            .call("getLatestBlockhash", json!([{ "commitment": COMMITMENT }]))
            .await?;
        Ok(result.value.blockhash)
    }

    async fn signature_status(
        &self,
        signature: &TransactionSignature,
    ) -> Result<SignatureStatus, ChainError> {
        let result: WithContext<Vec<Option<StatusValue>>> = self
            .call(
                "getSignatureStatuses",
                json!([[signature.as_str()], { "searchTransactionHistory": true }]),
            )
            .await?;

        let Some(Some(status)) = result.value.into_iter().next() else {
            return Ok(SignatureStatus::NotFound);
        };
        if let Some(err) = status.err.filter(|e| !e.is_null()) {
            return Ok(SignatureStatus::Failed(err.to_string()));
        }
        Ok(match status.confirmation_status.as_deref() {
            Some("finalized") => SignatureStatus::Finalized,
            Some("confirmed") => SignatureStatus::Confirmed,
            _ => SignatureStatus::Processed,
        })
    }
}
