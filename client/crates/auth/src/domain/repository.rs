//! Credential Store Trait
//!
//! Persistence port for the active session. Implementations are in the
//! infrastructure layer.

use crate::domain::entity::session::Session;
use crate::error::AuthResult;

/// Credential store trait
///
/// Get/set/clear only. The request pipeline re-reads it on every call, so
/// writers outside the pipeline (login, logout) are always observed.
#[trait_variant::make(CredentialStore: Send)]
pub trait LocalCredentialStore {
    /// Load the stored session, if any
    async fn load(&self) -> AuthResult<Option<Session>>;

    /// Replace the stored session
    async fn save(&self, session: &Session) -> AuthResult<()>;

    /// Remove both tokens
    async fn clear(&self) -> AuthResult<()>;
}
