//! Domain Layer
//!
//! Contains entities, value objects, and the credential store trait.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    session::Session,
    user::{UsageStats, UserProfile},
};
pub use repository::CredentialStore;
