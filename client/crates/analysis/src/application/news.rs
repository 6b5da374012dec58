//! News Service

use std::sync::Arc;

use auth::domain::CredentialStore;
use auth::{RequestOptions, RequestPipeline};
use kernel::id::ArticleId;

use crate::application::config::AnalysisConfig;
use crate::domain::entity::article::Article;
use crate::domain::value_object::filters::FeedFilters;
use crate::error::AnalysisResult;

/// Feed and article lookup
pub struct NewsService<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pipeline: RequestPipeline<S>,
    config: Arc<AnalysisConfig>,
}

impl<S> NewsService<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pub fn new(pipeline: RequestPipeline<S>, config: Arc<AnalysisConfig>) -> Self {
        Self { pipeline, config }
    }

    /// `GET /news/feed`, empty filters omitted
    pub async fn feed(&self, filters: &FeedFilters) -> AnalysisResult<Vec<Article>> {
        let options = filters
            .query_pairs()
            .into_iter()
            .fold(
                RequestOptions::get(self.config.feed_endpoint.as_str()),
                |options, (key, value)| options.query(key, value),
            );

        let articles: Vec<Article> = self.pipeline.send_as(&options).await?;
        tracing::debug!(count = articles.len(), "Feed loaded");
        Ok(articles)
    }

    /// `GET /news/{id}`
    pub async fn get_article(&self, id: &ArticleId) -> AnalysisResult<Article> {
        Ok(self
            .pipeline
            .get(&self.config.article_url(id.as_str()))
            .await?)
    }
}
