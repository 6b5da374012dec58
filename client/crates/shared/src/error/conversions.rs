//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`ApiError`].

use super::api_error::ApiError;

// ============================================================================
// Standard library conversions
// ============================================================================

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::network("I/O operation failed").with_source(err)
    }
}

impl From<std::string::FromUtf8Error> for ApiError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ApiError::internal("Invalid UTF-8 in response").with_source(err)
    }
}

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            ApiError::internal(format!("Unexpected response shape: {}", err)).with_source(err)
        } else {
            ApiError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// reqwest conversions (feature-gated)
// ============================================================================

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        // Body decoding failures come from a response that did arrive.
        if err.is_decode() {
            return ApiError::internal("Failed to decode response body").with_source(err);
        }
        let message = if err.is_timeout() {
            "Request timed out"
        } else if err.is_connect() {
            "Could not connect to server"
        } else {
            "Network Error"
        };
        ApiError::network(message).with_source(err)
    }
}
