use crate::config::CollectorConfig;
use crate::error::SearchError;
use crate::search::{SearchQuery, TweetSearch};
use crate::tweet::RawTweet;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Split the span ending at `now` into `count` back-to-back windows of
/// `width`, returned oldest first. `None` if any window boundary falls
/// outside the representable time range.
pub fn plan_windows(
    now: DateTime<Utc>,
    count: u32,
    width: Duration,
) -> Option<Vec<TimeWindow>> {
    (0..count)
        .rev()
        .map(|i| {
            let offset = width.checked_mul(i32::try_from(i).ok()?)?;
            let end = now.checked_sub_signed(offset)?;
            let start = end.checked_sub_signed(width)?;
            Some(TimeWindow { start, end })
        })
        .collect()
}

/// Queries the search backend once per time window and concatenates the
/// results. Backend errors are returned as-is; there is no retry.
pub struct WindowedCollector {
    search: Arc<dyn TweetSearch>,
    config: CollectorConfig,
}

impl WindowedCollector {
    pub fn new(search: Arc<dyn TweetSearch>, config: CollectorConfig) -> Self {
        Self { search, config }
    }

    pub async fn collect(&self, keyword: &str) -> Result<Vec<RawTweet>, SearchError> {
        let now = i64::try_from(self.config.end_lag_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|lag| Utc::now().checked_sub_signed(lag))
            .ok_or_else(|| {
                SearchError::InvalidWindow(format!(
                    "end lag of {}s is out of range",
                    self.config.end_lag_secs
                ))
            })?;
        self.collect_until(keyword, now).await
    }

    /// Collect with windows anchored at `now` instead of the wall clock.
    pub async fn collect_until(
        &self,
        keyword: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<RawTweet>, SearchError> {
        let windows = Duration::try_hours(i64::from(self.config.window_hours))
            .and_then(|width| plan_windows(now, self.config.window_count, width))
            .ok_or_else(|| {
                SearchError::InvalidWindow(format!(
                    "{} windows of {}h before {} are out of range",
                    self.config.window_count, self.config.window_hours, now
                ))
            })?;
        let query = format!("{} lang:{}", keyword, self.config.language);

        let mut tweets = Vec::new();
        for window in &windows {
            let request = SearchQuery {
                query: query.clone(),
                start: window.start,
                end: window.end,
                max_results: self.config.max_results,
            };
            let posts = self.search.search(&request).await?;
            tracing::debug!(
                start = %window.start,
                end = %window.end,
                count = posts.len(),
                "collected window"
            );
            tweets.extend(
                posts
                    .into_iter()
                    .map(|post| RawTweet::new(post.created_at, post.text)),
            );
        }

        if tweets.is_empty() {
            // Keep downstream stages well-defined with one blank row.
            let start = windows.last().map(|w| w.start).unwrap_or(now);
            tracing::warn!(keyword, "no tweets found in any window");
            tweets.push(RawTweet::new(start, ""));
        }

        tracing::info!(keyword, count = tweets.len(), "collection finished");
        Ok(tweets)
    }
}
