//! Infrastructure Layer
//!
//! Credential store implementations.

pub mod file;
pub mod memory;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;
