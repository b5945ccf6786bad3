use crate::config::EmptyTablePolicy;
use crate::error::{PipelineError, PipelineResult, RankError};
use crate::frequency::rank;
use crate::normalize::TextNormalizer;
use crate::sentiment::SentimentScorer;
use crate::tweet::{CleanedTweet, FrequencyTable, RawTweet};
use std::sync::Arc;

/// Centered boxcar average of `samples` with the output the same length as
/// the input. Near the edges the window runs off the data and the missing
/// samples count as zero, so boundary values are pulled toward zero.
pub fn moving_average(samples: &[f64], width: usize) -> Vec<f64> {
    if width == 0 {
        return samples.to_vec();
    }

    let n = samples.len() as isize;
    let left = (width / 2) as isize;
    let w = width as f64;

    (0..n)
        .map(|i| {
            let lo = (i - left).max(0);
            let hi = (i - left + width as isize).min(n);
            let sum: f64 = if lo < hi {
                samples[lo as usize..hi as usize].iter().sum()
            } else {
                0.0
            };
            sum / w
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Aggregate {
    pub cleaned: Vec<CleanedTweet>,
    /// Smoothed sentiment, index-aligned with the input tweets.
    pub sentiment: Vec<f64>,
    pub words: FrequencyTable,
    pub hashtags: FrequencyTable,
}

/// Cleans and scores every tweet, smooths the sentiment series, and builds
/// the word and hashtag frequency tables.
pub struct RollingAggregator {
    normalizer: TextNormalizer,
    scorer: Arc<dyn SentimentScorer>,
    smoothing_width: usize,
    empty_tables: EmptyTablePolicy,
}

impl RollingAggregator {
    pub fn new(
        scorer: Arc<dyn SentimentScorer>,
        smoothing_width: usize,
        empty_tables: EmptyTablePolicy,
    ) -> PipelineResult<Self> {
        Ok(Self {
            normalizer: TextNormalizer::new()?,
            scorer,
            smoothing_width,
            empty_tables,
        })
    }

    pub async fn aggregate(&self, raw: &[RawTweet]) -> PipelineResult<Aggregate> {
        if raw.is_empty() {
            return Err(PipelineError::NoTweets);
        }

        let cleaned: Vec<CleanedTweet> = raw
            .iter()
            .map(|tweet| self.normalizer.normalize(&tweet.text))
            .collect();

        // One scoring call per tweet, in order.
        let mut scores = Vec::with_capacity(cleaned.len());
        for tweet in &cleaned {
            scores.push(self.scorer.score(&tweet.tokens).await?);
        }
        let sentiment = moving_average(&scores, self.smoothing_width);
        tracing::debug!(
            tweets = raw.len(),
            width = self.smoothing_width,
            "scored and smoothed sentiment"
        );

        let tokens: Vec<&str> = cleaned.iter().map(|c| c.tokens.as_str()).collect();
        let words = self.table("words", rank(&tokens))?;

        let hashtags: Vec<String> = cleaned
            .iter()
            .filter(|c| !c.hashtags.is_empty())
            .map(|c| c.hashtags.join(" "))
            .collect();
        let hashtags = self.table("hashtags", rank(&hashtags))?;

        Ok(Aggregate {
            cleaned,
            sentiment,
            words,
            hashtags,
        })
    }

    fn table(
        &self,
        name: &'static str,
        ranked: Result<FrequencyTable, RankError>,
    ) -> PipelineResult<FrequencyTable> {
        match (ranked, self.empty_tables) {
            (Ok(table), _) => Ok(table),
            (Err(RankError::EmptyInput), EmptyTablePolicy::Substitute) => {
                tracing::warn!(table = name, "nothing to count, using an empty table");
                Ok(FrequencyTable::default())
            }
            (Err(source), EmptyTablePolicy::Fail) => Err(PipelineError::Rank {
                table: name,
                source,
            }),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::ScoreError;
    use crate::sentiment::LexiconScorer;
    use async_trait::async_trait;
    use chrono::DateTime;
    use std::sync::Mutex;

    /// Returns a fixed value per known text and records what it was asked.
    pub(crate) struct FakeScorer {
        pub(crate) seen: Mutex<Vec<String>>,
    }

    impl FakeScorer {
        pub(crate) fn new() -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SentimentScorer for FakeScorer {
        async fn score(&self, text: &str) -> Result<f64, ScoreError> {
            self.seen.lock().unwrap().push(text.to_string());
            Ok(match text {
                "" => 0.0,
                t if t.contains("love") => 1.0,
                t if t.contains("hate") => -1.0,
                _ => 0.5,
            })
        }
    }

    fn tweet(secs: i64, text: &str) -> RawTweet {
        RawTweet::new(DateTime::from_timestamp(secs, 0).unwrap(), text)
    }

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-12)
    }

    #[test]
    fn test_moving_average_odd_width() {
        let out = moving_average(&[1.0, 1.0, 1.0, 1.0, 1.0], 3);
        assert!(close(&out, &[2.0 / 3.0, 1.0, 1.0, 1.0, 2.0 / 3.0]));
    }

    #[test]
    fn test_moving_average_even_width_leans_left() {
        // Window for index i covers i-2..=i+1.
        let out = moving_average(&[1.0, 2.0, 3.0, 4.0], 4);
        assert!(close(&out, &[3.0 / 4.0, 6.0 / 4.0, 10.0 / 4.0, 9.0 / 4.0]));
    }

    #[test]
    fn test_moving_average_width_one_is_identity() {
        let samples = [0.3, -0.2, 0.9];
        assert!(close(&moving_average(&samples, 1), &samples));
    }

    #[test]
    fn test_moving_average_preserves_length() {
        let samples: Vec<f64> = (0..17).map(|i| (i as f64).sin()).collect();
        for width in 1..=17 {
            assert_eq!(moving_average(&samples, width).len(), samples.len());
        }
    }

    #[test]
    fn test_moving_average_wider_than_input() {
        let out = moving_average(&[1.0, 1.0], 5);
        assert!(close(&out, &[2.0 / 5.0, 2.0 / 5.0]));
    }

    #[tokio::test]
    async fn test_aggregate_aligns_and_ranks() {
        let scorer = Arc::new(FakeScorer::new());
        let aggregator =
            RollingAggregator::new(scorer.clone(), 1, EmptyTablePolicy::Fail).unwrap();
        let raw = vec![
            tweet(1, "I love pizza #food"),
            tweet(2, "I hate waiting for pizza"),
            tweet(3, "pizza time #food #friday"),
        ];

        let result = aggregator.aggregate(&raw).await.unwrap();
        assert_eq!(result.sentiment.len(), raw.len());
        assert!(close(&result.sentiment, &[1.0, -1.0, 0.5]));
        assert_eq!(
            *scorer.seen.lock().unwrap(),
            vec!["love pizza", "hate waiting pizza", "pizza time"]
        );
        assert_eq!(result.words.labels[0], "pizza");
        assert_eq!(result.words.counts[0], 3);
        assert_eq!(result.hashtags.labels, vec!["food", "friday"]);
        assert_eq!(result.hashtags.counts, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_aggregate_rejects_empty_input() {
        let aggregator =
            RollingAggregator::new(Arc::new(FakeScorer::new()), 3, EmptyTablePolicy::Substitute)
                .unwrap();
        assert!(matches!(
            aggregator.aggregate(&[]).await,
            Err(PipelineError::NoTweets)
        ));
    }

    #[tokio::test]
    async fn test_all_stopword_tweet_scores_neutral_with_lexicon() {
        let aggregator = RollingAggregator::new(
            Arc::new(LexiconScorer::new()),
            1,
            EmptyTablePolicy::Substitute,
        )
        .unwrap();
        let result = aggregator.aggregate(&[tweet(0, "the a an")]).await.unwrap();
        assert_eq!(result.cleaned[0].tokens, "");
        assert_eq!(result.sentiment, vec![0.0]);
        assert!(result.words.is_empty());
        assert!(result.hashtags.is_empty());
    }

    #[tokio::test]
    async fn test_missing_hashtags_fail_under_fail_policy() {
        let aggregator =
            RollingAggregator::new(Arc::new(FakeScorer::new()), 1, EmptyTablePolicy::Fail)
                .unwrap();
        let result = aggregator.aggregate(&[tweet(0, "pizza tonight")]).await;
        assert!(matches!(
            result,
            Err(PipelineError::Rank {
                table: "hashtags",
                source: RankError::EmptyInput
            })
        ));
    }

    #[tokio::test]
    async fn test_smoothing_applies_configured_width() {
        let aggregator =
            RollingAggregator::new(Arc::new(FakeScorer::new()), 3, EmptyTablePolicy::Substitute)
                .unwrap();
        let raw = vec![
            tweet(1, "love it"),
            tweet(2, "love it"),
            tweet(3, "love it"),
        ];
        let result = aggregator.aggregate(&raw).await.unwrap();
        assert!(close(&result.sentiment, &[2.0 / 3.0, 1.0, 2.0 / 3.0]));
    }
}
