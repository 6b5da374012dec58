//! Domain Layer
//!
//! Articles, chat messages, preferences and the analysis event vocabulary.

pub mod entity;
pub mod value_object;

// Re-exports
pub use entity::{
    article::{Article, ArticleUpdate},
    chat::{ChatMessage, ChatRole},
    preferences::NewsPreferences,
};
pub use value_object::{event::AnalysisEvent, filters::FeedFilters, stage::AgentStage};
