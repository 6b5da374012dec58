//! News Preferences Entity

use serde::{Deserialize, Serialize};

/// Feed personalisation stored per user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsPreferences {
    #[serde(default)]
    pub favorite_categories: Vec<String>,
    #[serde(default)]
    pub favorite_keywords: Vec<String>,
    /// `short` or `long`
    #[serde(default)]
    pub summary_style: Option<String>,
}
