//! Application Layer
//!
//! Request pipeline, refresh coordination and auth use cases.

pub mod config;
pub mod login;
pub mod logout;
pub mod pipeline;
pub mod profile;
pub mod refresh;
pub mod register;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use pipeline::{RequestBody, RequestOptions, RequestPipeline};
pub use profile::ProfileService;
pub use refresh::{RefreshCoordinator, RefreshOutcome};
pub use register::{RegisterInput, RegisterUseCase};
