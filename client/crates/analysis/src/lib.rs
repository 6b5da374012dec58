//! Analysis Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Article, chat and preference entities, analysis events,
//!   agent stages, feed filters
//! - `application/` - Streaming ingester, progress fold, news / AI /
//!   preferences services
//! - `infra/` - Frame decoding and the cancellable event stream
//!
//! ## Stream Format
//! `POST /ai/process` answers with UTF-8 frames separated by a blank line,
//! each `data: <json>`. Exactly one `complete` or `error` event ends the
//! sequence; malformed frames are logged and skipped.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::{
    AiService, AnalysisConfig, AnalysisIngester, AnalysisProgress, AnalysisStatus, AskRequest,
    NewsService, PreferencesService,
};
pub use domain::{
    AgentStage, AnalysisEvent, Article, ArticleUpdate, ChatMessage, ChatRole, FeedFilters,
    NewsPreferences,
};
pub use error::{AnalysisError, AnalysisResult};
pub use infra::AnalysisStream;
