pub mod aggregate;
pub mod collector;
pub mod config;
pub mod error;
pub mod frequency;
pub mod normalize;
pub mod search;
pub mod sentiment;
pub mod timeseries;
pub mod tweet;
pub mod ui;

pub use config::Config;
pub use error::{PipelineError, PipelineResult};
pub use timeseries::TimeseriesAssembler;
pub use tweet::{CleanedTweet, FrequencyTable, RawTweet, TimeseriesReport, TimeseriesRow};
