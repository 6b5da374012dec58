//! Analysis Progress
//!
//! Folds analysis events into what a UI shows: a stage indicator, the
//! latest agent message, the enriched article and the chat transcript.

use std::fmt::Write;

use crate::domain::entity::{article::Article, chat::ChatMessage};
use crate::domain::value_object::{event::AnalysisEvent, stage::AgentStage};

/// Where the analysis stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStatus {
    Running,
    Completed,
    Failed,
}

/// Local progress/result state for one analysis request
#[derive(Debug, Clone)]
pub struct AnalysisProgress {
    pub stage: Option<AgentStage>,
    /// 0.0 ..= 1.0, never decreases
    pub fraction: f32,
    pub message: Option<String>,
    pub article: Article,
    pub chat: Vec<ChatMessage>,
    pub status: AnalysisStatus,
    pub error: Option<String>,
}

impl AnalysisProgress {
    pub fn new(article: Article) -> Self {
        Self {
            stage: None,
            fraction: 0.0,
            message: None,
            article,
            chat: Vec::new(),
            status: AnalysisStatus::Running,
            error: None,
        }
    }

    /// Continue an existing conversation
    pub fn with_chat(mut self, chat: Vec<ChatMessage>) -> Self {
        self.chat = chat;
        self
    }

    pub fn is_finished(&self) -> bool {
        self.status != AnalysisStatus::Running
    }

    /// Apply one event; events after the terminal one are ignored
    pub fn apply(&mut self, event: AnalysisEvent) {
        if self.is_finished() {
            tracing::debug!("Ignoring analysis event after completion");
            return;
        }

        match event {
            AnalysisEvent::Progress { agent, message } => {
                // Unknown agents keep the current stage
                if let Some(stage) = AgentStage::from_agent(&agent) {
                    self.stage = Some(stage);
                    self.fraction = self.fraction.max(stage.fraction());
                }
                self.message = Some(message);
            }
            AnalysisEvent::Complete { article } => {
                self.article.merge(article);
                self.stage = Some(AgentStage::Done);
                self.fraction = AgentStage::Done.fraction();
                self.message = Some("Analysis complete".to_string());
                self.chat.push(ChatMessage::assistant(render_result(&self.article)));
                self.status = AnalysisStatus::Completed;
            }
            AnalysisEvent::Error { message } => {
                self.error = Some(message);
                self.status = AnalysisStatus::Failed;
            }
        }
    }
}

/// Chat rendering of a finished analysis
fn render_result(article: &Article) -> String {
    let mut out = format!("Analysis of \"{}\"", article.title);

    if let Some(summary) = article.summary() {
        let _ = write!(out, "\n\nSummary: {summary}");
    }
    if let Some(sentiment) = &article.sentiment {
        let _ = write!(out, "\nSentiment: {sentiment}");
    }
    if let (Some(label), Some(score)) = (article.bias_label(), article.bias_score) {
        let _ = write!(out, "\nBias: {label} ({score:+.2})");
    }
    if let Some(explanation) = &article.bias_explanation {
        let _ = write!(out, "\n{explanation}");
    }
    if !article.key_points.is_empty() {
        out.push_str("\n\nKey points:");
        for point in &article.key_points {
            let _ = write!(out, "\n- {point}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::article::ArticleUpdate;
    use crate::domain::entity::chat::ChatRole;

    fn progress(agent: &str) -> AnalysisEvent {
        AnalysisEvent::Progress {
            agent: agent.to_string(),
            message: format!("{agent} running"),
        }
    }

    #[test]
    fn test_stage_tracking() {
        let mut state = AnalysisProgress::new(Article::new("a-1", "Title"));

        state.apply(progress("collector"));
        assert_eq!(state.stage, Some(AgentStage::Collector));
        assert_eq!(state.fraction, 0.2);

        state.apply(progress("summarizer"));
        assert_eq!(state.fraction, 0.6);

        // Unknown agent keeps the fraction but updates the message
        state.apply(progress("translator"));
        assert_eq!(state.fraction, 0.6);
        assert_eq!(state.stage, Some(AgentStage::Summarizer));
        assert_eq!(state.message.as_deref(), Some("translator running"));
    }

    #[test]
    fn test_complete_merges_and_appends_chat() {
        let mut article = Article::new("a-1", "Title");
        article.description = Some("Original description".into());
        article.sentiment = Some("neutral".into());
        let mut state = AnalysisProgress::new(article);

        state.apply(progress("collector"));
        state.apply(progress("bias"));
        state.apply(AnalysisEvent::Complete {
            article: ArticleUpdate {
                summary_short: Some("Short summary".into()),
                sentiment: Some("negative".into()),
                bias_score: Some(-0.6),
                ..Default::default()
            },
        });

        assert_eq!(state.status, AnalysisStatus::Completed);
        assert_eq!(state.fraction, 1.0);
        assert_eq!(state.article.description.as_deref(), Some("Original description"));
        assert_eq!(state.article.sentiment.as_deref(), Some("negative"));
        assert_eq!(state.article.summary_short.as_deref(), Some("Short summary"));

        assert_eq!(state.chat.len(), 1);
        assert_eq!(state.chat[0].role, ChatRole::Assistant);
        assert!(state.chat[0].content.contains("Bias: Left (-0.60)"));
    }

    #[test]
    fn test_error_is_terminal() {
        let mut state = AnalysisProgress::new(Article::new("a-1", "Title"));
        state.apply(AnalysisEvent::error("quota exceeded"));
        state.apply(progress("collector"));

        assert_eq!(state.status, AnalysisStatus::Failed);
        assert_eq!(state.error.as_deref(), Some("quota exceeded"));
        assert!(state.stage.is_none());
        assert!(state.chat.is_empty());
    }
}
