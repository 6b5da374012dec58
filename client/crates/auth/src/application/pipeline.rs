//! Request Pipeline
//!
//! Wraps every backend call. Attaches the stored bearer credential, turns
//! non-2xx responses and transport failures into [`ApiError`], and performs
//! at most one transparent refresh-and-retry when the credential is rejected.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use kernel::error::api_error::{ApiError, ApiResult};
use platform::config::ClientConfig;
use platform::http::{build_http_client, ensure_success, error_from_response};
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::application::config::AuthConfig;
use crate::application::refresh::{RefreshCoordinator, RefreshOutcome};
use crate::domain::entity::session::Session;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::token_pair::TokenPair;

// ============================================================================
// Request options
// ============================================================================

/// Request payload, kept in re-sendable form for the retry
#[derive(Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Form(Vec<(String, String)>),
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestBody::Empty => f.write_str("Empty"),
            RequestBody::Json(_) => f.write_str("Json(..)"),
            // Form bodies carry passwords
            RequestBody::Form(pairs) => f
                .debug_list()
                .entries(pairs.iter().map(|(key, _)| key))
                .finish(),
        }
    }
}

/// Method, endpoint, query and body of one logical call
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    /// Path relative to the API root, e.g. `/payments/verify`
    pub endpoint: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl RequestOptions {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    /// Append a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set a JSON body
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Set a form-encoded body
    pub fn form<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.body = RequestBody::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Authenticated request pipeline
///
/// Holds an explicit session context (`store`); nothing is read from
/// ambient state. The access token is re-read from the store on every call,
/// so login/logout performed elsewhere is always observed.
pub struct RequestPipeline<S> {
    http: reqwest::Client,
    client_config: Arc<ClientConfig>,
    auth_config: Arc<AuthConfig>,
    store: Arc<S>,
    refresh: RefreshCoordinator,
}

impl<S> Clone for RequestPipeline<S> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            client_config: self.client_config.clone(),
            auth_config: self.auth_config.clone(),
            store: self.store.clone(),
            refresh: self.refresh.clone(),
        }
    }
}

impl<S> RequestPipeline<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    /// Create a pipeline with its own HTTP client
    pub fn new(
        store: Arc<S>,
        client_config: Arc<ClientConfig>,
        auth_config: Arc<AuthConfig>,
    ) -> ApiResult<Self> {
        let http = build_http_client(&client_config)?;
        Ok(Self::with_http_client(http, store, client_config, auth_config))
    }

    pub fn with_http_client(
        http: reqwest::Client,
        store: Arc<S>,
        client_config: Arc<ClientConfig>,
        auth_config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            http,
            client_config,
            auth_config,
            store,
            refresh: RefreshCoordinator::new(),
        }
    }

    /// Share a refresh coordinator with other pipelines over the same store
    pub fn with_refresh_coordinator(mut self, coordinator: RefreshCoordinator) -> Self {
        self.refresh = coordinator;
        self
    }

    pub fn refresh_coordinator(&self) -> &RefreshCoordinator {
        &self.refresh
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn client_config(&self) -> &ClientConfig {
        &self.client_config
    }

    pub fn auth_config(&self) -> &AuthConfig {
        &self.auth_config
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }

    // ------------------------------------------------------------------------
    // Typed helpers
    // ------------------------------------------------------------------------

    /// `GET endpoint`, decoded as `T`
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.send_as(&RequestOptions::get(endpoint)).await
    }

    /// `POST endpoint` with a JSON body, decoded as `T`
    pub async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let options = RequestOptions::post(endpoint).json(serde_json::to_value(body)?);
        self.send_as(&options).await
    }

    /// `POST endpoint` without a body, decoded as `T`
    pub async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.send_as(&RequestOptions::post(endpoint)).await
    }

    /// Send and decode as `T`
    pub async fn send_as<T: DeserializeOwned>(&self, options: &RequestOptions) -> ApiResult<T> {
        let value = self.send(options).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Send and return the raw JSON body (`Null` for an empty body)
    pub async fn send(&self, options: &RequestOptions) -> ApiResult<Value> {
        let response = self
            .execute(options, Some(self.client_config.request_timeout))
            .await?;
        decode_json(response).await
    }

    /// `POST endpoint` with a JSON body and hand back the live response
    ///
    /// Authentication and the single refresh-and-retry behave exactly as for
    /// JSON calls; both happen before any body bytes are consumed. No
    /// whole-request timeout is applied, so long streams are not cut off.
    pub async fn open_stream(&self, endpoint: &str, body: Value) -> ApiResult<Response> {
        let options = RequestOptions::post(endpoint).json(body);
        self.execute(&options, None).await
    }

    // ------------------------------------------------------------------------
    // Core
    // ------------------------------------------------------------------------

    async fn execute(
        &self,
        options: &RequestOptions,
        timeout: Option<Duration>,
    ) -> ApiResult<Response> {
        let token = self.bearer_for(&options.endpoint).await?;
        let response = self.dispatch(options, token.as_deref(), timeout).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return ensure_success(response).await;
        }

        let original = error_from_response(response).await;
        if !self.auth_config.sends_bearer(&options.endpoint) {
            // Login and refresh rejections are final
            return Err(original);
        }
        self.recover_unauthorized(options, token, original, timeout)
            .await
    }

    /// Single recovery attempt after a 401
    async fn recover_unauthorized(
        &self,
        options: &RequestOptions,
        used_token: Option<String>,
        original: ApiError,
        timeout: Option<Duration>,
    ) -> ApiResult<Response> {
        let Some(session) = self.load_session().await? else {
            return Err(original);
        };

        // Already replaced by a concurrent refresh or a fresh login
        if used_token.as_deref() != Some(session.access_token.as_str()) {
            tracing::debug!(
                endpoint = %options.endpoint,
                "Credential changed during request, retrying with current one"
            );
            return self.retry(options, &session.access_token, timeout).await;
        }

        let Some(refresh_token) = session.refresh_token.clone().filter(|t| !t.is_empty()) else {
            tracing::info!(
                endpoint = %options.endpoint,
                "Access token rejected and no refresh token stored, clearing session"
            );
            self.clear_store().await;
            return Err(original);
        };

        let stale_token = session.access_token.clone();
        let pipeline = self.clone();
        let outcome = self
            .refresh
            .refresh(&stale_token, move || {
                pipeline.perform_refresh(session, refresh_token)
            })
            .await;

        match outcome {
            RefreshOutcome::Refreshed { access_token } => {
                self.retry(options, &access_token, timeout).await
            }
            RefreshOutcome::Rejected => Err(original),
        }
    }

    /// The one retry; its failure is surfaced as-is
    async fn retry(
        &self,
        options: &RequestOptions,
        token: &str,
        timeout: Option<Duration>,
    ) -> ApiResult<Response> {
        let response = self.dispatch(options, Some(token), timeout).await?;
        ensure_success(response).await
    }

    /// Exchange the refresh token for a new pair
    ///
    /// Owns its inputs so it can run as a shared in-flight future.
    async fn perform_refresh(self, session: Session, refresh_token: String) -> RefreshOutcome {
        let url = self
            .client_config
            .endpoint_url(&self.auth_config.refresh_endpoint);

        let result = async {
            let response = self
                .http
                .post(url)
                .query(&[("refresh_token", refresh_token.as_str())])
                .timeout(self.client_config.request_timeout)
                .send()
                .await?;
            let response = ensure_success(response).await?;
            Ok::<TokenPair, ApiError>(response.json::<TokenPair>().await?)
        }
        .await;

        match result {
            Ok(pair) => {
                let next = session.refreshed(pair);
                if let Err(e) = self.store.save(&next).await {
                    e.log();
                }
                tracing::info!("Access token refreshed");
                RefreshOutcome::Refreshed {
                    access_token: next.access_token,
                }
            }
            Err(e) => {
                tracing::warn!(
                    status = e.status(),
                    network = e.is_network(),
                    "Token refresh failed, clearing session"
                );
                self.clear_store().await;
                RefreshOutcome::Rejected
            }
        }
    }

    async fn dispatch(
        &self,
        options: &RequestOptions,
        token: Option<&str>,
        timeout: Option<Duration>,
    ) -> ApiResult<Response> {
        let url = self.client_config.endpoint_url(&options.endpoint);
        let mut request = self.http.request(options.method.clone(), url);

        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        match &options.body {
            RequestBody::Empty => {}
            RequestBody::Json(body) => request = request.json(body),
            RequestBody::Form(pairs) => request = request.form(pairs),
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!(
            method = %options.method,
            endpoint = %options.endpoint,
            authenticated = token.is_some(),
            "Sending request"
        );

        request.send().await.map_err(|e| {
            let err = ApiError::from(e);
            tracing::warn!(endpoint = %options.endpoint, error = %err, "Request failed");
            err
        })
    }

    async fn bearer_for(&self, endpoint: &str) -> ApiResult<Option<String>> {
        if !self.auth_config.sends_bearer(endpoint) {
            return Ok(None);
        }
        self.refresh.settled().await;
        Ok(self.load_session().await?.map(|s| s.access_token))
    }

    async fn load_session(&self) -> ApiResult<Option<Session>> {
        Ok(self.store.load().await?)
    }

    async fn clear_store(&self) {
        if let Err(e) = self.store.clear().await {
            e.log();
        }
    }
}

async fn decode_json(response: Response) -> ApiResult<Value> {
    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&bytes)?)
}
