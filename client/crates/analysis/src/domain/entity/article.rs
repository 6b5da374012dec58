//! Article Entity
//!
//! A news article as served by the feed, enriched in place by analysis
//! results.

use chrono::{DateTime, Utc};
use kernel::id::ArticleId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// News article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub category: Vec<String>,
    #[serde(default, with = "kernel::time::lenient_option")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_short: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_long: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    /// -1.0 (left) .. 1.0 (right)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias_explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_points: Vec<String>,
    /// Fields this client does not model, kept for round-tripping
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partial article carried by a completed analysis
///
/// Absent and `null` fields both mean "unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ArticleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Vec<String>>,
    #[serde(
        default,
        with = "kernel::time::lenient_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_short: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_long: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias_explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_points: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Article {
    pub fn new(id: impl Into<ArticleId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: String::new(),
            description: None,
            content: None,
            author: None,
            category: Vec::new(),
            published_at: None,
            image_url: None,
            summary_short: None,
            summary_long: None,
            sentiment: None,
            bias_score: None,
            bias_explanation: None,
            key_points: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Overwrite the fields present in `update`; keep the rest
    ///
    /// The article's identity (`id`) never changes.
    pub fn merge(&mut self, update: ArticleUpdate) {
        fn set<T>(field: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *field = value;
            }
        }
        fn set_opt<T>(field: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *field = value;
            }
        }

        set(&mut self.title, update.title);
        set(&mut self.url, update.url);
        set_opt(&mut self.description, update.description);
        set_opt(&mut self.content, update.content);
        set_opt(&mut self.author, update.author);
        set(&mut self.category, update.category);
        set_opt(&mut self.published_at, update.published_at);
        set_opt(&mut self.image_url, update.image_url);
        set_opt(&mut self.summary_short, update.summary_short);
        set_opt(&mut self.summary_long, update.summary_long);
        set_opt(&mut self.sentiment, update.sentiment);
        set_opt(&mut self.bias_score, update.bias_score);
        set_opt(&mut self.bias_explanation, update.bias_explanation);
        set(&mut self.key_points, update.key_points);

        for (key, value) in update.extra {
            if !value.is_null() {
                self.extra.insert(key, value);
            }
        }
    }

    /// Best available summary
    pub fn summary(&self) -> Option<&str> {
        self.summary_long
            .as_deref()
            .or(self.summary_short.as_deref())
            .or(self.description.as_deref())
    }

    /// Human-readable bias label
    pub fn bias_label(&self) -> Option<&'static str> {
        self.bias_score.map(|score| match score {
            s if s <= -0.5 => "Left",
            s if s < -0.1 => "Lean Left",
            s if s <= 0.1 => "Center",
            s if s < 0.5 => "Lean Right",
            _ => "Right",
        })
    }
}

/// Categories arrive either as one string or a list
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_one_or_many(deserializer)?.unwrap_or_default())
}

fn opt_one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(
        Option::<OneOrMany>::deserialize(deserializer)?.map(|value| match value {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn article() -> Article {
        serde_json::from_value(json!({
            "id": "a-1",
            "title": "Rates hold steady",
            "url": "https://news.example/rates",
            "description": "Central bank pauses",
            "category": "business",
            "published_at": "2026-02-10T08:30:00",
            "sentiment": "neutral",
            "raw_payload": {"source": "wire"}
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_feed_article() {
        let article = article();
        assert_eq!(article.category, vec!["business".to_string()]);
        assert!(article.published_at.is_some());
        assert!(article.extra.contains_key("raw_payload"));
        assert_eq!(article.summary(), Some("Central bank pauses"));
    }

    #[test]
    fn test_merge_overwrites_present_fields_only() {
        let mut article = article();
        let update: ArticleUpdate = serde_json::from_value(json!({
            "id": "other",
            "summary_short": "Rates unchanged.",
            "sentiment": "positive",
            "bias_score": 0.2,
            "description": null,
            "key_points": ["No change", "Next review in March"]
        }))
        .unwrap();

        article.merge(update);

        assert_eq!(article.id.as_str(), "a-1");
        assert_eq!(article.title, "Rates hold steady");
        assert_eq!(article.description.as_deref(), Some("Central bank pauses"));
        assert_eq!(article.summary_short.as_deref(), Some("Rates unchanged."));
        assert_eq!(article.sentiment.as_deref(), Some("positive"));
        assert_eq!(article.bias_label(), Some("Lean Right"));
        assert_eq!(article.key_points.len(), 2);
        assert_eq!(article.category, vec!["business".to_string()]);
    }

    #[test]
    fn test_serialize_keeps_unmodelled_fields() {
        let value = serde_json::to_value(article()).unwrap();
        assert_eq!(value["raw_payload"]["source"], "wire");
        assert_eq!(value["id"], "a-1");
    }
}
