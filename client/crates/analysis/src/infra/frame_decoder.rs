//! Frame Decoder
//!
//! Turns one complete stream frame into an `AnalysisEvent`.

use crate::domain::value_object::event::AnalysisEvent;
use crate::error::AnalysisError;

/// Parses `marker + JSON` frames
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    marker: String,
}

impl FrameDecoder {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// Decode a frame
    ///
    /// ## Returns
    /// `Ok(None)` for frames that carry no payload (comments, keep-alives)
    pub fn decode(&self, frame: &str) -> Result<Option<AnalysisEvent>, AnalysisError> {
        let mut payload = String::new();
        let mut saw_other = false;

        for line in frame.lines() {
            if let Some(data) = line.strip_prefix(self.marker.as_str()) {
                if !payload.is_empty() {
                    payload.push('\n');
                }
                payload.push_str(data.strip_prefix(' ').unwrap_or(data));
            } else if !line.trim().is_empty() && !line.starts_with(':') {
                saw_other = true;
            }
        }

        if payload.trim().is_empty() {
            if saw_other {
                return Err(AnalysisError::StreamFrame {
                    frame: frame.to_string(),
                    reason: format!("missing '{}' marker", self.marker),
                });
            }
            return Ok(None);
        }

        serde_json::from_str(&payload)
            .map(Some)
            .map_err(|e| AnalysisError::StreamFrame {
                frame: frame.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoder() -> FrameDecoder {
        FrameDecoder::new("data:")
    }

    #[test]
    fn test_decode_progress() {
        let event = decoder()
            .decode(r#"data: {"status":"progress","agent":"classifier","message":"Tagging"}"#)
            .unwrap();
        assert_eq!(
            event,
            Some(AnalysisEvent::Progress {
                agent: "classifier".into(),
                message: "Tagging".into()
            })
        );
    }

    #[test]
    fn test_marker_without_space() {
        let event = decoder()
            .decode(r#"data:{"status":"error","message":"boom"}"#)
            .unwrap();
        assert_eq!(event, Some(AnalysisEvent::error("boom")));
    }

    #[test]
    fn test_comments_are_ignored() {
        assert_eq!(decoder().decode(": keep-alive").unwrap(), None);
    }

    #[test]
    fn test_malformed_frames() {
        assert!(matches!(
            decoder().decode(r#"data: {"status":"progr"#),
            Err(AnalysisError::StreamFrame { .. })
        ));
        assert!(matches!(
            decoder().decode("garbage"),
            Err(AnalysisError::StreamFrame { .. })
        ));
    }
}
