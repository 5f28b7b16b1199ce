//! motorwatch: automotive news vs. short-term stock trends.
//!
//! A linear pipeline: scrape the PR Newswire automotive listing, match each
//! article against a ticker/alias table, persist the tagged articles to a flat
//! CSV store, pull a 30-day daily close/volume series per ticker from the
//! Yahoo chart API, render one price+volume chart per ticker and map each
//! series to a BUY / WAIT / AVOID recommendation.

pub mod chart;
pub mod core;
pub mod history;
pub mod matrix;
pub mod news;
pub mod pipeline;
pub mod store;
pub mod symbols;
pub mod trend;

pub use crate::core::client::{Client, ClientBuilder};
pub use crate::core::error::Error;
pub use history::{PriceHistoryBuilder, PricePoint};
pub use matrix::MentionMatrix;
pub use news::{Article, NewsBuilder};
pub use pipeline::{PipelineConfig, RunSummary, TickerOutcome};
pub use store::{NewsStore, TaggedArticle};
pub use symbols::{SymbolMatcher, SymbolTable};
pub use trend::{Recommendation, TrendReport, TrendThresholds};
