pub mod lexicon;
pub mod model;

use crate::config::{AnalysisConfig, ModelConfig, ScorerKind};
use crate::error::ScoreError;
use async_trait::async_trait;
use std::sync::Arc;

pub use lexicon::LexiconScorer;
pub use model::ModelScorer;

/// Maps cleaned tweet text to a single polarity value.
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    async fn score(&self, text: &str) -> Result<f64, ScoreError>;
}

/// Construct the scorer selected in the analysis config. The caller owns
/// the returned scorer; dropping it releases its resources.
pub fn build_scorer(
    analysis: &AnalysisConfig,
    model: &ModelConfig,
) -> Result<Arc<dyn SentimentScorer>, ScoreError> {
    match analysis.scorer {
        ScorerKind::Lexicon => Ok(Arc::new(LexiconScorer::new())),
        ScorerKind::Model => Ok(Arc::new(ModelScorer::new(model)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_lexicon_scorer() {
        let scorer = build_scorer(&AnalysisConfig::default(), &ModelConfig::default()).unwrap();
        assert_eq!(scorer.score("").await.unwrap(), 0.0);
    }

    #[test]
    fn test_build_model_scorer() {
        let analysis = AnalysisConfig {
            scorer: ScorerKind::Model,
            ..AnalysisConfig::default()
        };
        assert!(build_scorer(&analysis, &ModelConfig::default()).is_ok());
    }
}
