//! AI Service
//!
//! Article Q&A and feed summaries.

use std::sync::Arc;

use auth::RequestPipeline;
use auth::domain::CredentialStore;
use kernel::id::ArticleId;
use serde::{Deserialize, Serialize};

use crate::application::config::AnalysisConfig;
use crate::domain::entity::chat::ChatMessage;
use crate::error::{AnalysisError, AnalysisResult};

/// Body of `POST /ai/ask`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_id: Option<ArticleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl AskRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Default::default()
        }
    }

    pub fn about(mut self, article_id: ArticleId) -> Self {
        self.article_id = Some(article_id);
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct AskResponse {
    answer: String,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    summary: String,
}

/// AI endpoints other than the streaming analysis
pub struct AiService<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pipeline: RequestPipeline<S>,
    config: Arc<AnalysisConfig>,
}

impl<S> AiService<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pub fn new(pipeline: RequestPipeline<S>, config: Arc<AnalysisConfig>) -> Self {
        Self { pipeline, config }
    }

    /// `POST /ai/ask`
    pub async fn ask(&self, request: &AskRequest) -> AnalysisResult<String> {
        if request.question.trim().is_empty() {
            return Err(AnalysisError::InvalidInput("question is empty".to_string()));
        }
        let response: AskResponse = self
            .pipeline
            .post_json(&self.config.ask_endpoint, request)
            .await?;
        Ok(response.answer)
    }

    /// Ask and record both sides of the exchange in `chat`
    pub async fn ask_in_chat(
        &self,
        request: &AskRequest,
        chat: &mut Vec<ChatMessage>,
    ) -> AnalysisResult<String> {
        let answer = self.ask(request).await?;
        chat.push(ChatMessage::user(request.question.clone()));
        chat.push(ChatMessage::assistant(answer.clone()));
        Ok(answer)
    }

    /// `POST /ai/feed/summary`
    pub async fn summarize_feed(&self) -> AnalysisResult<String> {
        let response: SummaryResponse = self
            .pipeline
            .post_empty(&self.config.feed_summary_endpoint)
            .await?;
        Ok(response.summary)
    }
}
