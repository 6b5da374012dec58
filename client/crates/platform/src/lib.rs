//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations for the client:
//! - Client configuration (base URL, timeouts)
//! - HTTP client construction and backend error-body decoding
//! - Frame buffering for chunked, delimiter-framed streams
//! - Bounded retry / polling policies

pub mod config;
pub mod frame;
pub mod http;
pub mod retry;
