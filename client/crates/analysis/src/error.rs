//! Analysis Error Types
//!
//! Analysis-specific error variants that integrate with the unified
//! `kernel::ApiError` system.

use kernel::error::{api_error::ApiError, kind::ErrorKind};
use thiserror::Error;

/// Analysis-specific result type alias
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Analysis-specific error variants
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A stream frame could not be decoded; the frame is skipped
    #[error("Unparseable stream frame: {reason}")]
    StreamFrame { frame: String, reason: String },

    /// Input rejected before any request was sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AnalysisError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::StreamFrame { .. } => ErrorKind::BadGateway,
            AnalysisError::InvalidInput(_) => ErrorKind::BadRequest,
            AnalysisError::Api(e) => e.kind(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, AnalysisError::Api(e) if e.is_network())
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AnalysisError::StreamFrame { frame, reason } => {
                tracing::warn!(reason = %reason, frame_len = frame.len(), "Skipping malformed stream frame");
            }
            AnalysisError::Api(e) if e.is_network() || e.is_server_error() => {
                tracing::error!(error = %e, "Analysis request failed");
            }
            _ => {
                tracing::debug!(error = %self, "Analysis error");
            }
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Api(e) => e,
            other => ApiError::from_kind(other.kind(), other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Api(err.into())
    }
}
