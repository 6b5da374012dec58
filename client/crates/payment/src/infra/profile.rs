//! Profile refresher backed by the auth profile service

use auth::application::ProfileService;
use auth::domain::CredentialStore;
use kernel::error::api_error::ApiError;

use crate::domain::port::ProfileRefresher;

/// Re-reads `/auth/me` after a settlement
pub struct AuthProfileRefresher<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    profile: ProfileService<S>,
}

impl<S> AuthProfileRefresher<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pub fn new(profile: ProfileService<S>) -> Self {
        Self { profile }
    }
}

impl<S> ProfileRefresher for AuthProfileRefresher<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    async fn refresh_profile(&self) -> Result<(), ApiError> {
        let profile = self.profile.me().await?;
        tracing::info!(
            user_id = %profile.id,
            premium = profile.has_active_premium(),
            "Profile refreshed"
        );
        Ok(())
    }
}
