//! Logout Use Case
//!
//! Drops the stored credential pair. The backend keeps no server-side
//! session, so nothing is sent.

use std::sync::Arc;

use crate::domain::repository::CredentialStore;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
}

impl<S> LogoutUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> AuthResult<()> {
        self.store.clear().await?;
        tracing::info!("User signed out");
        Ok(())
    }
}
