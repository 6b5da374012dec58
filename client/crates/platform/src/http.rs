//! HTTP utilities
//!
//! Client construction and decoding of the backend's structured error bodies.

use kernel::error::api_error::{ApiError, DEFAULT_ERROR_MESSAGE};
use serde_json::Value;

use crate::config::ClientConfig;

/// Build the shared `reqwest::Client`
///
/// Only the connect timeout is set on the client itself: streaming calls
/// must outlive the JSON request timeout, which is applied per request.
pub fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .connect_timeout(config.connect_timeout)
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| ApiError::internal("Failed to build HTTP client").with_source(e))
}

/// Extract a human-readable message from an error body
///
/// Accepts `{"detail": "..."}` and the validation form
/// `{"detail": [{"msg": "...", ...}, ...]}`.
///
/// ## Returns
/// The message, or `None` when the body carries no usable detail
pub fn parse_error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) if !detail.is_empty() => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

/// Convert a non-2xx response into an [`ApiError`]
///
/// The body is consumed. A body that cannot be read or parsed falls back
/// to the generic message.
pub async fn error_from_response(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = parse_error_detail(&body).unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
    ApiError::new(status, message)
}

/// Returns the response on success or the decoded error otherwise
pub async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(error_from_response(response).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_string_detail() {
        let detail = parse_error_detail(r#"{"detail":"Incorrect email or password"}"#);
        assert_eq!(detail.as_deref(), Some("Incorrect email or password"));
    }

    #[test]
    fn test_parse_validation_detail() {
        let body = r#"{"detail":[{"loc":["body","amount"],"msg":"field required"},{"msg":"bad plan"}]}"#;
        assert_eq!(
            parse_error_detail(body).as_deref(),
            Some("field required; bad plan")
        );
    }

    #[test]
    fn test_parse_missing_detail() {
        assert!(parse_error_detail(r#"{"error":"x"}"#).is_none());
        assert!(parse_error_detail("<html>502</html>").is_none());
        assert!(parse_error_detail(r#"{"detail":""}"#).is_none());
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&ClientConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_error_from_response_uses_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"detail": "Invalid plan"})),
            )
            .mount(&server)
            .await;

        let response = reqwest::get(server.uri()).await.unwrap();
        let err = ensure_success(response).await.unwrap_err();
        assert_eq!(err.status(), 400);
        assert_eq!(err.message(), "Invalid plan");
    }

    #[tokio::test]
    async fn test_error_from_response_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let response = reqwest::get(server.uri()).await.unwrap();
        let err = error_from_response(response).await;
        assert_eq!(err.status(), 503);
        assert_eq!(err.message(), DEFAULT_ERROR_MESSAGE);
    }
}
