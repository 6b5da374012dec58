//! Agent Stage
//!
//! Maps backend agent names onto a coarse progress indicator. Used for
//! display only.

use std::fmt;

/// Pipeline stage, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgentStage {
    Collector,
    Classifier,
    Summarizer,
    Bias,
    Done,
}

impl AgentStage {
    /// Recognise an agent name such as `"summarizer"` or `"bias_detector"`
    pub fn from_agent(agent: &str) -> Option<Self> {
        let agent = agent.trim().to_ascii_lowercase();
        if agent.starts_with("collect") {
            Some(AgentStage::Collector)
        } else if agent.starts_with("classif") {
            Some(AgentStage::Classifier)
        } else if agent.starts_with("summar") {
            Some(AgentStage::Summarizer)
        } else if agent.starts_with("bias") {
            Some(AgentStage::Bias)
        } else if agent == "done" || agent == "complete" {
            Some(AgentStage::Done)
        } else {
            None
        }
    }

    /// Share of the pipeline finished once this stage is reported
    pub fn fraction(self) -> f32 {
        match self {
            AgentStage::Collector => 0.2,
            AgentStage::Classifier => 0.4,
            AgentStage::Summarizer => 0.6,
            AgentStage::Bias => 0.8,
            AgentStage::Done => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgentStage::Collector => "Collecting sources",
            AgentStage::Classifier => "Classifying",
            AgentStage::Summarizer => "Summarizing",
            AgentStage::Bias => "Detecting bias",
            AgentStage::Done => "Done",
        }
    }
}

impl fmt::Display for AgentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
