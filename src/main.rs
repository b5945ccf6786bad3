use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tweetpulse::config::{Config, BEARER_TOKEN_ENV};
use tweetpulse::search::twitter::TwitterSearchClient;
use tweetpulse::sentiment::build_scorer;
use tweetpulse::{ui, TimeseriesAssembler};

#[derive(Parser)]
#[command(name = "tweetpulse")]
#[command(about = "Rolling Twitter sentiment, word and hashtag frequency for a keyword", long_about = None)]
#[command(version)]
struct Cli {
    /// Keyword to search for
    keyword: String,

    /// Path to config file (default: ~/.tweetpulse/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the report as JSON instead of opening the dashboard
    #[arg(long)]
    json: bool,

    /// Number of time windows to query
    #[arg(long)]
    window_count: Option<u32>,

    /// Moving-average width applied to the sentiment series
    #[arg(long)]
    smoothing: Option<usize>,

    /// Log pipeline progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "tweetpulse=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli
        .config
        .clone()
        .or_else(Config::default_path)
        .context("could not determine config path")?;
    let mut config = Config::load(&config_path)?;
    config.apply_env();
    if let Some(count) = cli.window_count {
        config.collector.window_count = count;
    }
    if let Some(width) = cli.smoothing {
        config.analysis.smoothing_width = width;
    }
    config.validate()?;

    let bearer_token = config.twitter.bearer_token.clone().with_context(|| {
        format!(
            "missing Twitter bearer token: set {} or twitter.bearer_token in {}",
            BEARER_TOKEN_ENV,
            config_path.display()
        )
    })?;

    let search = Arc::new(
        TwitterSearchClient::new(bearer_token, &config.twitter)
            .context("failed to build Twitter client")?,
    );
    let scorer = build_scorer(&config.analysis, &config.model)
        .context("failed to build sentiment scorer")?;
    let assembler = TimeseriesAssembler::new(search, scorer, &config)?;

    let report = assembler
        .assemble(&cli.keyword)
        .await
        .with_context(|| format!("sentiment pipeline failed for '{}'", cli.keyword))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    ui::run(report)
}
