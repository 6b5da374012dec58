//! Analysis Ingester
//!
//! Starts a streaming multi-agent analysis for one article.

use std::sync::Arc;

use auth::RequestPipeline;
use auth::domain::CredentialStore;
use futures_util::StreamExt;
use platform::frame::FrameBuffer;

use crate::application::config::AnalysisConfig;
use crate::application::progress::AnalysisProgress;
use crate::domain::entity::article::Article;
use crate::error::{AnalysisError, AnalysisResult};
use crate::infra::{AnalysisStream, FrameDecoder};

/// Streaming analysis use case
pub struct AnalysisIngester<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pipeline: RequestPipeline<S>,
    config: Arc<AnalysisConfig>,
}

impl<S> AnalysisIngester<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pub fn new(pipeline: RequestPipeline<S>, config: Arc<AnalysisConfig>) -> Self {
        Self { pipeline, config }
    }

    /// Open one analysis request carrying the full article
    ///
    /// Authentication failures and HTTP errors surface here; once the
    /// stream is returned, every failure arrives as an `Error` event.
    pub async fn process(&self, article: &Article) -> AnalysisResult<AnalysisStream> {
        if self.config.frame_delimiter.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "frame delimiter must not be empty".to_string(),
            ));
        }

        let body = serde_json::to_value(article)?;
        let response = self
            .pipeline
            .open_stream(&self.config.process_endpoint, body)
            .await?;
        tracing::info!(article_id = %article.id, "Analysis stream opened");

        Ok(AnalysisStream::spawn(
            response.bytes_stream(),
            FrameBuffer::new(&self.config.frame_delimiter),
            FrameDecoder::new(self.config.frame_marker.clone()),
        ))
    }

    /// Run an analysis to its end, reporting each intermediate state
    pub async fn analyze<F>(&self, article: Article, mut on_update: F) -> AnalysisResult<AnalysisProgress>
    where
        F: FnMut(&AnalysisProgress),
    {
        let mut stream = self.process(&article).await?;
        let mut progress = AnalysisProgress::new(article);

        while let Some(event) = stream.next().await {
            progress.apply(event);
            on_update(&progress);
        }

        tracing::info!(
            article_id = %progress.article.id,
            status = ?progress.status,
            "Analysis finished"
        );
        Ok(progress)
    }
}
