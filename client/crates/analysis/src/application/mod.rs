//! Application Layer
//!
//! Streaming analysis, progress folding, news, AI Q&A and preferences.

pub mod ask;
pub mod config;
pub mod ingest;
pub mod news;
pub mod preferences;
pub mod progress;

// Re-exports
pub use ask::{AiService, AskRequest};
pub use config::AnalysisConfig;
pub use ingest::AnalysisIngester;
pub use news::NewsService;
pub use preferences::PreferencesService;
pub use progress::{AnalysisProgress, AnalysisStatus};
