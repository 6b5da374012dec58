//! Login / register / profile flows against a mock backend

use std::sync::Arc;

use auth::application::{
    LoginInput, LoginUseCase, LogoutUseCase, ProfileService, RegisterInput, RegisterUseCase,
};
use auth::domain::CredentialStore;
use auth::{AuthConfig, AuthError, FileCredentialStore, MemoryCredentialStore, RequestPipeline};
use platform::config::ClientConfig;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn profile_json() -> serde_json::Value {
    json!({
        "id": "0d6c1c8a-0000-4000-8000-000000000001",
        "email": "reader@example.com",
        "full_name": "Reader",
        "is_premium": false,
        "premium_expiry": null,
        "refresh_tokens": 3
    })
}

fn pipeline<S>(server: &MockServer, store: Arc<S>) -> RequestPipeline<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    RequestPipeline::new(
        store,
        Arc::new(ClientConfig::new(server.uri())),
        Arc::new(AuthConfig::default()),
    )
    .unwrap()
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=reader%40example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "a1",
            "refresh_token": "r1",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_persists_session_across_store_instances() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let store = Arc::new(FileCredentialStore::new(&path));

    let profile = LoginUseCase::new(pipeline(&server, store))
        .execute(LoginInput {
            email: "Reader@Example.com".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();
    assert_eq!(profile.display_name(), "Reader");

    let reopened = FileCredentialStore::new(&path);
    let session = reopened.load().await.unwrap().unwrap();
    assert_eq!(session.access_token, "a1");
    assert_eq!(session.refresh_token.as_deref(), Some("r1"));
}

#[tokio::test]
async fn login_rejection_is_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Incorrect email or password"})),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let err = LoginUseCase::new(pipeline(&server, store.clone()))
        .execute(LoginInput {
            email: "reader@example.com".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials(ref m) if m == "Incorrect email or password"));
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn login_validates_email_locally() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryCredentialStore::new());
    let err = LoginUseCase::new(pipeline(&server, store))
        .execute(LoginInput {
            email: "not-an-email".into(),
            password: "x".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidInput(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn register_then_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_string_contains("\"full_name\":\"Reader\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
        .expect(1)
        .mount(&server)
        .await;
    mount_login(&server).await;

    let store = Arc::new(MemoryCredentialStore::new());
    let profile = RegisterUseCase::new(pipeline(&server, store.clone()))
        .execute(RegisterInput {
            email: "reader@example.com".into(),
            password: "secret".into(),
            full_name: Some("Reader".into()),
        })
        .await
        .unwrap();

    assert_eq!(profile.email, "reader@example.com");
    assert!(store.load().await.unwrap().is_some());
}

#[tokio::test]
async fn profile_requires_session() {
    let server = MockServer::start().await;
    let service = ProfileService::new(pipeline(&server, Arc::new(MemoryCredentialStore::new())));

    assert!(matches!(service.me().await, Err(AuthError::NotAuthenticated)));
    assert!(matches!(service.usage().await, Err(AuthError::NotAuthenticated)));
}

#[tokio::test]
async fn usage_and_logout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me/usage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_tokens": 1200,
            "daily_tokens": 300,
            "request_count": 9,
            "limit_daily": 1000,
            "refresh_tokens": 2,
            "news_refresh_available": true,
            "summary_refresh_available": false
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_session(auth::Session::new(
        "a1",
        Some("r1".into()),
    )));
    let service = ProfileService::new(pipeline(&server, store.clone()));

    let usage = service.usage().await.unwrap();
    assert_eq!(usage.daily_remaining(), 700);
    assert_eq!(usage.news_refresh_available, Some(true));

    LogoutUseCase::new(store.clone()).execute().await.unwrap();
    assert!(!service.is_signed_in().await.unwrap());
}

#[tokio::test]
async fn delete_account_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_session(auth::Session::new("a1", None)));
    let service = ProfileService::new(pipeline(&server, store.clone()));

    service.delete_account().await.unwrap();
    assert!(store.load().await.unwrap().is_none());
}
