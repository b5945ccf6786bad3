use crate::aggregate::RollingAggregator;
use crate::collector::WindowedCollector;
use crate::config::Config;
use crate::error::PipelineResult;
use crate::search::TweetSearch;
use crate::sentiment::SentimentScorer;
use crate::tweet::{RawTweet, TimeseriesReport, TimeseriesRow};
use std::sync::Arc;

/// Runs collection and aggregation for a keyword and packages the result
/// for the dashboard.
pub struct TimeseriesAssembler {
    collector: WindowedCollector,
    aggregator: RollingAggregator,
    top_n: usize,
}

impl TimeseriesAssembler {
    pub fn new(
        search: Arc<dyn TweetSearch>,
        scorer: Arc<dyn SentimentScorer>,
        config: &Config,
    ) -> PipelineResult<Self> {
        Ok(Self {
            collector: WindowedCollector::new(search, config.collector.clone()),
            aggregator: RollingAggregator::new(
                scorer,
                config.analysis.smoothing_width,
                config.analysis.empty_tables,
            )?,
            top_n: config.analysis.top_n,
        })
    }

    pub async fn assemble(&self, keyword: &str) -> PipelineResult<TimeseriesReport> {
        tracing::info!(keyword, "assembling sentiment timeseries");
        let raw = self.collector.collect(keyword).await?;
        self.assemble_from(keyword, raw).await
    }

    async fn assemble_from(
        &self,
        keyword: &str,
        raw: Vec<RawTweet>,
    ) -> PipelineResult<TimeseriesReport> {
        let aggregate = self.aggregator.aggregate(&raw).await?;

        let rows = raw
            .into_iter()
            .zip(aggregate.sentiment)
            .map(|(tweet, sentiment)| TimeseriesRow {
                time: tweet.timestamp,
                sentiment,
                text: tweet.text,
            })
            .collect();

        Ok(TimeseriesReport {
            keyword: keyword.to_string(),
            rows,
            words: aggregate.words.truncated(self.top_n),
            hashtags: aggregate.hashtags.truncated(self.top_n),
        })
    }
}
