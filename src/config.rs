use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const BEARER_TOKEN_ENV: &str = "TWITTER_BEARER_TOKEN";
pub const MODEL_TOKEN_ENV: &str = "HF_API_TOKEN";

/// Recent search only reaches back seven days.
pub const MAX_LOOKBACK_HOURS: u64 = 7 * 24;
/// Upper bound on how far before "now" the newest window may end.
pub const MAX_END_LAG_SECS: u64 = 3600;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub twitter: TwitterConfig,
    pub collector: CollectorConfig,
    pub analysis: AnalysisConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TwitterConfig {
    pub bearer_token: Option<String>,
    pub api_base: String,
    /// Route every request through this proxy, e.g. `http://proxy:8080`.
    pub proxy: Option<String>,
    pub accept_invalid_certs: bool,
    pub timeout_secs: u64,
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            bearer_token: None,
            api_base: "https://api.twitter.com/2".to_string(),
            proxy: None,
            accept_invalid_certs: false,
            timeout_secs: 20,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub window_count: u32,
    pub window_hours: u32,
    pub max_results: u32,
    pub language: String,
    /// The search API refuses end times too close to the present.
    pub end_lag_secs: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            window_count: 5,
            window_hours: 24,
            max_results: 100,
            language: "en".to_string(),
            end_lag_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorerKind {
    Lexicon,
    Model,
}

/// What to do when a frequency table has nothing to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyTablePolicy {
    Substitute,
    Fail,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub scorer: ScorerKind,
    pub smoothing_width: usize,
    pub top_n: usize,
    pub empty_tables: EmptyTablePolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            scorer: ScorerKind::Lexicon,
            smoothing_width: 5,
            top_n: 10,
            empty_tables: EmptyTablePolicy::Substitute,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    pub endpoint: String,
    pub api_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api-inference.huggingface.co/models/cardiffnlp/twitter-roberta-base-sentiment-latest".to_string(),
            api_token: None,
            timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".tweetpulse").join("config.toml"))
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Credentials from the environment take precedence over the file.
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var(BEARER_TOKEN_ENV) {
            self.twitter.bearer_token = Some(token);
        }
        if let Ok(token) = std::env::var(MODEL_TOKEN_ENV) {
            self.model.api_token = Some(token);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.collector.window_count == 0 {
            bail!("collector.window_count must be at least 1");
        }
        if self.collector.window_hours == 0 {
            bail!("collector.window_hours must be at least 1");
        }
        let lookback =
            u64::from(self.collector.window_count) * u64::from(self.collector.window_hours);
        if lookback > MAX_LOOKBACK_HOURS {
            bail!(
                "collector covers {}h ({} windows of {}h), more than the {}h search lookback",
                lookback,
                self.collector.window_count,
                self.collector.window_hours,
                MAX_LOOKBACK_HOURS
            );
        }
        if self.collector.end_lag_secs > MAX_END_LAG_SECS {
            bail!(
                "collector.end_lag_secs must be at most {}, got {}",
                MAX_END_LAG_SECS,
                self.collector.end_lag_secs
            );
        }
        if !(10..=100).contains(&self.collector.max_results) {
            bail!(
                "collector.max_results must be between 10 and 100, got {}",
                self.collector.max_results
            );
        }
        if self.analysis.smoothing_width == 0 {
            bail!("analysis.smoothing_width must be at least 1");
        }
        Ok(())
    }
}
