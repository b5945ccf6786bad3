use super::SentimentScorer;
use crate::error::ScoreError;
use async_trait::async_trait;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Rule-based scorer backed by the VADER lexicon and heuristics; the score
/// is VADER's compound value in [-1, 1].
///
/// Input is already stopword-filtered, so VADER's negation and intensifier
/// rules only fire for words outside the stopword list ("never", "dont",
/// "really", ...), not for "not", "no", "so" or "very".
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }

    /// Compound polarity of `text`. Text with no known words scores 0.0.
    pub fn polarity(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let analyzer = SentimentIntensityAnalyzer::new();
        analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
    }
}

#[async_trait]
impl SentimentScorer for LexiconScorer {
    async fn score(&self, text: &str) -> Result<f64, ScoreError> {
        Ok(self.polarity(text))
    }
}
