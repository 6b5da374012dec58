//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::ApiError` shape returned by the request pipeline.

use kernel::error::{api_error::ApiError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login rejected by the backend (wrong email/password, inactive user)
    #[error("{0}")]
    InvalidCredentials(String),

    /// Input rejected before any request was sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No session is stored
    #[error("Not signed in")]
    NotAuthenticated,

    /// Credential store read/write failure
    #[error("Credential storage error: {0}")]
    Storage(String),

    /// Any other backend or transport failure
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials(_) | AuthError::InvalidInput(_) => ErrorKind::BadRequest,
            AuthError::NotAuthenticated => ErrorKind::Unauthorized,
            AuthError::Storage(_) => ErrorKind::InternalServerError,
            AuthError::Api(e) => e.kind(),
        }
    }

    /// Whether the failure was at the transport level
    pub fn is_network(&self) -> bool {
        matches!(self, AuthError::Api(e) if e.is_network())
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Storage(msg) => {
                tracing::error!(message = %msg, "Credential storage error");
            }
            AuthError::InvalidCredentials(_) => {
                tracing::warn!("Login rejected");
            }
            AuthError::Api(e) if e.is_server_error() => {
                tracing::error!(error = %e, "Auth request failed");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Api(e) => e,
            other => ApiError::from_kind(other.kind(), other.to_string()),
        }
    }
}

impl From<std::io::Error> for AuthError {
    fn from(err: std::io::Error) -> Self {
        AuthError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(AuthError::NotAuthenticated.kind(), ErrorKind::Unauthorized);
        assert_eq!(
            AuthError::InvalidCredentials("Incorrect email or password".into()).kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(
            AuthError::Api(ApiError::new(404, "gone")).kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_into_api_error_preserves_backend_error() {
        let err: ApiError = AuthError::Api(ApiError::new(429, "Slow down")).into();
        assert_eq!(err.status(), 429);
        assert_eq!(err.message(), "Slow down");

        let err: ApiError = AuthError::Storage("disk full".into()).into();
        assert_eq!(err.status(), 500);
    }

    #[test]
    fn test_is_network() {
        assert!(AuthError::Api(ApiError::network("reset")).is_network());
        assert!(!AuthError::NotAuthenticated.is_network());
    }
}
