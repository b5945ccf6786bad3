use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by search API: {0}")]
    RateLimited(String),

    #[error("search API rejected credentials ({status})")]
    Unauthorized { status: u16 },

    #[error("search API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed search response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid search window: {0}")]
    InvalidWindow(String),
}

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sentiment model error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed model output: {0}")]
    Output(String),

    #[error("malformed model response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankError {
    #[error("nothing to rank: input contains no tokens")]
    EmptyInput,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("sentiment scoring failed: {0}")]
    Score(#[from] ScoreError),

    #[error("frequency ranking of {table} failed: {source}")]
    Rank {
        table: &'static str,
        #[source]
        source: RankError,
    },

    #[error("no tweets to aggregate")]
    NoTweets,

    #[error("invalid text pattern: {0}")]
    Pattern(#[from] regex::Error),
}
