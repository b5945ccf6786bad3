pub mod twitter;

use crate::error::SearchError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// One bounded request against a search backend.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub query: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub max_results: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchPost {
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A source of recent posts. Implementations return posts for a single
/// time range; callers drive the windowing.
#[async_trait]
pub trait TweetSearch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchPost>, SearchError>;
}
