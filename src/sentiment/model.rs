use super::SentimentScorer;
use crate::config::ModelConfig;
use crate::error::ScoreError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Scores text with a hosted three-class classifier (negative / neutral /
/// positive) and folds the class probabilities into one value.
pub struct ModelScorer {
    endpoint: String,
    api_token: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

// The inference API nests results per input; accept both shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ModelOutput {
    Batched(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ModelScorer {
    pub fn new(config: &ModelConfig) -> Result<Self, ScoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_token: config.api_token.clone(),
            client,
        })
    }
}

/// `(-P(negative) + P(positive) + P(neutral)) / 3`
pub fn combine_probabilities(scores: &[LabelScore]) -> Result<f64, ScoreError> {
    let mut negative = None;
    let mut neutral = None;
    let mut positive = None;

    for entry in scores {
        match entry.label.to_lowercase().as_str() {
            "negative" | "label_0" => negative = Some(entry.score),
            "neutral" | "label_1" => neutral = Some(entry.score),
            "positive" | "label_2" => positive = Some(entry.score),
            _ => {}
        }
    }

    match (negative, neutral, positive) {
        (Some(neg), Some(neu), Some(pos)) => Ok((-neg + pos + neu) / 3.0),
        _ => Err(ScoreError::Output(format!(
            "expected negative, neutral and positive labels, got {:?}",
            scores.iter().map(|s| s.label.as_str()).collect::<Vec<_>>()
        ))),
    }
}

fn parse_model_output(body: &str) -> Result<f64, ScoreError> {
    let output: ModelOutput = serde_json::from_str(body)?;
    let scores = match output {
        ModelOutput::Batched(mut batches) => {
            if batches.is_empty() {
                return Err(ScoreError::Output("empty model output".to_string()));
            }
            batches.swap_remove(0)
        }
        ModelOutput::Flat(scores) => scores,
    };
    combine_probabilities(&scores)
}

#[async_trait]
impl SentimentScorer for ModelScorer {
    async fn score(&self, text: &str) -> Result<f64, ScoreError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "inputs": text }));
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ScoreError::Api {
                status: status.as_u16(),
                body,
            });
        }

        parse_model_output(&body)
    }
}
