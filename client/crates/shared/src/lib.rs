//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of client vocabulary:
//! - The single error shape returned by every backend call
//! - Status classification shared by all domains
//! - Typed identifiers for server-issued records
//! - Lenient decoding of backend timestamps
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod api_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod time;

pub use error::api_error::{ApiError, ApiResult};
pub use error::kind::ErrorKind;
