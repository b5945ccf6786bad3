use chrono::{DateTime, Utc};
use serde::Serialize;

/// One fetched post, as returned by the search capability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawTweet {
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

impl RawTweet {
    pub fn new(timestamp: DateTime<Utc>, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            text: text.into(),
        }
    }
}

/// Normalized form of a [`RawTweet`]: cleaned tokens plus the hashtags
/// pulled out of the text before tokenizing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedTweet {
    pub tokens: String,
    pub hashtags: Vec<String>,
}

/// Label/count pairs ordered by count, highest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequencyTable {
    pub labels: Vec<String>,
    pub counts: Vec<usize>,
}

impl FrequencyTable {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().copied())
    }

    /// Keep only the `n` most frequent entries. `0` keeps everything.
    pub fn truncated(mut self, n: usize) -> Self {
        if n > 0 {
            self.labels.truncate(n);
            self.counts.truncate(n);
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeseriesRow {
    pub time: DateTime<Utc>,
    pub sentiment: f64,
    pub text: String,
}

/// Everything the dashboard needs for one keyword.
#[derive(Debug, Clone, Serialize)]
pub struct TimeseriesReport {
    pub keyword: String,
    pub rows: Vec<TimeseriesRow>,
    pub words: FrequencyTable,
    pub hashtags: FrequencyTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FrequencyTable {
        FrequencyTable {
            labels: vec!["a".into(), "b".into(), "c".into()],
            counts: vec![3, 2, 1],
        }
    }

    #[test]
    fn test_truncated_keeps_top_entries() {
        let t = table().truncated(2);
        assert_eq!(t.labels, vec!["a", "b"]);
        assert_eq!(t.counts, vec![3, 2]);
    }

    #[test]
    fn test_truncated_zero_keeps_everything() {
        assert_eq!(table().truncated(0).len(), 3);
    }

    #[test]
    fn test_iter_pairs_labels_with_counts() {
        let pairs: Vec<_> = table().iter().map(|(l, c)| (l.to_string(), c)).collect();
        assert_eq!(pairs[0], ("a".to_string(), 3));
        assert_eq!(pairs[2], ("c".to_string(), 1));
    }

    #[test]
    fn test_report_serializes_rows() {
        let report = TimeseriesReport {
            keyword: "rust".into(),
            rows: vec![TimeseriesRow {
                time: DateTime::from_timestamp(0, 0).unwrap(),
                sentiment: 0.5,
                text: "hello".into(),
            }],
            words: table(),
            hashtags: FrequencyTable::default(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["keyword"], "rust");
        assert_eq!(json["rows"][0]["sentiment"], 0.5);
        assert_eq!(json["words"]["counts"][0], 3);
    }
}
