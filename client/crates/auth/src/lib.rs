//! Auth (Session) Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session, user entities, credential store trait
//! - `application/` - Request pipeline, refresh coordination, use cases
//! - `infra/` - In-memory and file-backed credential stores
//!
//! ## Session Model
//! - Access token attached as a bearer credential to every call except
//!   login and refresh
//! - One transparent refresh-and-retry per rejected call; concurrent
//!   rejections share a single refresh
//! - A rejected refresh clears both tokens and surfaces the original error

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::pipeline::{RequestOptions, RequestPipeline};
pub use domain::{CredentialStore, Session, UsageStats, UserProfile};
pub use error::{AuthError, AuthResult};
pub use infra::{FileCredentialStore, MemoryCredentialStore};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    api_error::{ApiError, ApiResult},
    kind::ErrorKind,
};
