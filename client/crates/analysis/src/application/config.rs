//! Application Configuration
//!
//! Configuration for the Analysis application layer.

use platform::frame::BLANK_LINE;

/// Analysis application configuration
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Streaming analysis endpoint
    pub process_endpoint: String,
    /// Bytes separating two frames
    pub frame_delimiter: Vec<u8>,
    /// Prefix of a payload line inside a frame
    pub frame_marker: String,
    pub feed_endpoint: String,
    /// Article lookup, `{id}` is substituted
    pub article_endpoint: String,
    pub ask_endpoint: String,
    pub feed_summary_endpoint: String,
    pub preferences_endpoint: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            process_endpoint: "/ai/process".to_string(),
            frame_delimiter: BLANK_LINE.to_vec(),
            frame_marker: "data:".to_string(),
            feed_endpoint: "/news/feed".to_string(),
            article_endpoint: "/news/{id}".to_string(),
            ask_endpoint: "/ai/ask".to_string(),
            feed_summary_endpoint: "/ai/feed/summary".to_string(),
            preferences_endpoint: "/preferences/me".to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn article_url(&self, id: &str) -> String {
        self.article_endpoint.replace("{id}", id)
    }
}
