//! Feed Filters

/// Optional feed filters; empty values are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedFilters {
    pub category: Option<String>,
    pub sentiment: Option<String>,
    pub search: Option<String>,
}

impl FeedFilters {
    /// Non-empty filters as query pairs, in a stable order
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("category", &self.category),
            ("sentiment", &self.sentiment),
            ("search", &self.search),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        })
        .collect()
    }
}
