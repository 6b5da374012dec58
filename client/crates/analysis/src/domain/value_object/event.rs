//! Analysis Event
//!
//! One decoded frame of the `/ai/process` stream.

use serde::{Deserialize, Serialize};

use crate::domain::entity::article::ArticleUpdate;

/// Progress of a multi-agent analysis, tagged by `status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalysisEvent {
    /// An agent started or finished a step
    Progress {
        agent: String,
        #[serde(default)]
        message: String,
    },
    /// Final result; fields present overwrite the local article
    Complete { article: ArticleUpdate },
    /// The pipeline failed (or the stream broke off)
    Error { message: String },
}

impl AnalysisEvent {
    pub fn error(message: impl Into<String>) -> Self {
        AnalysisEvent::Error {
            message: message.into(),
        }
    }

    /// `Complete` and `Error` end the stream
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AnalysisEvent::Progress { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_each_status() {
        let progress: AnalysisEvent =
            serde_json::from_str(r#"{"status":"progress","agent":"collector","message":"Fetching"}"#)
                .unwrap();
        assert!(!progress.is_terminal());

        let complete: AnalysisEvent =
            serde_json::from_str(r#"{"status":"complete","article":{"summary_short":"Done"}}"#)
                .unwrap();
        assert!(matches!(
            complete,
            AnalysisEvent::Complete { ref article } if article.summary_short.as_deref() == Some("Done")
        ));
        assert!(complete.is_terminal());

        let error: AnalysisEvent =
            serde_json::from_str(r#"{"status":"error","message":"LLM quota"}"#).unwrap();
        assert_eq!(error, AnalysisEvent::error("LLM quota"));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!(serde_json::from_str::<AnalysisEvent>(r#"{"status":"queued"}"#).is_err());
    }
}
