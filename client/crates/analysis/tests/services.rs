//! News, AI and preferences endpoints against a mock backend

use std::sync::Arc;

use analysis::{
    AiService, AnalysisConfig, AnalysisError, AskRequest, ChatMessage, FeedFilters,
    NewsPreferences, NewsService, PreferencesService,
};
use auth::{AuthConfig, MemoryCredentialStore, RequestPipeline, Session};
use kernel::id::ArticleId;
use platform::config::ClientConfig;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pipeline(server: &MockServer) -> RequestPipeline<MemoryCredentialStore> {
    let store = Arc::new(MemoryCredentialStore::with_session(Session::new("a1", None)));
    RequestPipeline::new(
        store,
        Arc::new(ClientConfig::new(server.uri())),
        Arc::new(AuthConfig::default()),
    )
    .unwrap()
}

fn config() -> Arc<AnalysisConfig> {
    Arc::new(AnalysisConfig::default())
}

#[tokio::test]
async fn feed_sends_only_non_empty_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news/feed"))
        .and(query_param("category", "technology"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a-1", "title": "Chips", "url": "https://n.example/1", "category": ["technology"]},
            {"id": "a-2", "title": "Cloud", "url": "https://n.example/2", "author": null}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let news = NewsService::new(pipeline(&server), config());
    let articles = news
        .feed(&FeedFilters {
            category: Some("technology".into()),
            sentiment: Some(String::new()),
            search: None,
        })
        .await
        .unwrap();
    assert_eq!(articles.len(), 2);

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert_eq!(query, "category=technology");
}

#[tokio::test]
async fn get_article_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news/a-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "a-7", "title": "Election recap", "url": "https://n.example/7"
        })))
        .mount(&server)
        .await;

    let article = NewsService::new(pipeline(&server), config())
        .get_article(&ArticleId::new("a-7"))
        .await
        .unwrap();
    assert_eq!(article.title, "Election recap");
}

#[tokio::test]
async fn ask_records_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ai/ask"))
        .and(body_json(json!({"question": "Who won?", "article_id": "a-7"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "The incumbent."})))
        .expect(1)
        .mount(&server)
        .await;

    let ai = AiService::new(pipeline(&server), config());
    let mut chat: Vec<ChatMessage> = Vec::new();
    let answer = ai
        .ask_in_chat(&AskRequest::new("Who won?").about(ArticleId::new("a-7")), &mut chat)
        .await
        .unwrap();

    assert_eq!(answer, "The incumbent.");
    assert_eq!(chat, vec![ChatMessage::user("Who won?"), ChatMessage::assistant("The incumbent.")]);
}

#[tokio::test]
async fn empty_question_is_rejected_locally() {
    let server = MockServer::start().await;
    let err = AiService::new(pipeline(&server), config())
        .ask(&AskRequest::new("   "))
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidInput(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn feed_summary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ai/feed/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"summary": "Quiet day."})))
        .mount(&server)
        .await;

    let summary = AiService::new(pipeline(&server), config())
        .summarize_feed()
        .await
        .unwrap();
    assert_eq!(summary, "Quiet day.");
}

#[tokio::test]
async fn preferences_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/preferences/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "favorite_categories": [],
            "favorite_keywords": []
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/preferences/me"))
        .and(body_json(json!({
            "favorite_categories": ["science"],
            "favorite_keywords": ["fusion"],
            "summary_style": "long"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "favorite_categories": ["science"],
            "favorite_keywords": ["fusion"],
            "summary_style": "long"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = PreferencesService::new(pipeline(&server), config());
    let mut prefs = service.get().await.unwrap();
    assert_eq!(prefs, NewsPreferences::default());

    prefs.favorite_categories.push("science".into());
    prefs.favorite_keywords.push("fusion".into());
    prefs.summary_style = Some("long".into());
    let saved = service.update(&prefs).await.unwrap();
    assert_eq!(saved, prefs);
}
