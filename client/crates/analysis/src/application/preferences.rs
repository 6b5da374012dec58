//! Preferences Service

use std::sync::Arc;

use auth::domain::CredentialStore;
use auth::{RequestOptions, RequestPipeline};

use crate::application::config::AnalysisConfig;
use crate::domain::entity::preferences::NewsPreferences;
use crate::error::AnalysisResult;

/// Reads and replaces the user's feed preferences
pub struct PreferencesService<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pipeline: RequestPipeline<S>,
    config: Arc<AnalysisConfig>,
}

impl<S> PreferencesService<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pub fn new(pipeline: RequestPipeline<S>, config: Arc<AnalysisConfig>) -> Self {
        Self { pipeline, config }
    }

    pub async fn get(&self) -> AnalysisResult<NewsPreferences> {
        Ok(self.pipeline.get(&self.config.preferences_endpoint).await?)
    }

    /// Replace all preferences
    pub async fn update(&self, preferences: &NewsPreferences) -> AnalysisResult<NewsPreferences> {
        let options = RequestOptions::put(self.config.preferences_endpoint.as_str())
            .json(serde_json::to_value(preferences)?);
        Ok(self.pipeline.send_as(&options).await?)
    }
}
