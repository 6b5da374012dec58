//! Profile Service
//!
//! Reads the signed-in user's profile and usage counters.

use crate::application::pipeline::{RequestOptions, RequestPipeline};
use crate::domain::entity::user::{UsageStats, UserProfile};
use crate::domain::repository::CredentialStore;
use crate::error::{AuthError, AuthResult};

/// Profile service
pub struct ProfileService<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pipeline: RequestPipeline<S>,
}

impl<S> Clone for ProfileService<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            pipeline: self.pipeline.clone(),
        }
    }
}

impl<S> ProfileService<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pub fn new(pipeline: RequestPipeline<S>) -> Self {
        Self { pipeline }
    }

    /// Whether a session is stored
    pub async fn is_signed_in(&self) -> AuthResult<bool> {
        Ok(self.pipeline.store().load().await?.is_some())
    }

    /// `GET /auth/me`
    pub async fn me(&self) -> AuthResult<UserProfile> {
        self.require_session().await?;
        Ok(self
            .pipeline
            .get(&self.pipeline.auth_config().me_endpoint)
            .await?)
    }

    /// `GET /auth/me/usage`
    pub async fn usage(&self) -> AuthResult<UsageStats> {
        self.require_session().await?;
        Ok(self
            .pipeline
            .get(&self.pipeline.auth_config().usage_endpoint)
            .await?)
    }

    /// `DELETE /auth/me`, then drop the local session
    pub async fn delete_account(&self) -> AuthResult<()> {
        self.require_session().await?;
        let endpoint = self.pipeline.auth_config().me_endpoint.clone();
        self.pipeline
            .send(&RequestOptions::delete(endpoint))
            .await?;
        self.pipeline.store().clear().await?;

        tracing::info!("Account deleted");
        Ok(())
    }

    async fn require_session(&self) -> AuthResult<()> {
        if self.is_signed_in().await? {
            Ok(())
        } else {
            Err(AuthError::NotAuthenticated)
        }
    }
}
