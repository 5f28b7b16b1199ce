//! End-to-end pipeline orchestration.
//!
//! Failures scoped to one ticker (no price data, short series, render
//! problems) are logged, recorded in the run summary and skipped; only the
//! shared setup steps (news fetch, store access) abort the run.

use std::path::PathBuf;

use chrono::NaiveDate;
use futures::future::join_all;
use tracing::{error, info, warn};

use crate::chart;
use crate::core::{Client, Error};
use crate::history::PriceHistoryBuilder;
use crate::matrix::MentionMatrix;
use crate::news::NewsBuilder;
use crate::store::{NewsStore, TaggedArticle};
use crate::symbols::{SymbolMatcher, SymbolTable};
use crate::trend::{self, TrendReport, TrendThresholds};

/// Everything one run needs, passed in explicitly.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Ticker/alias table used for matching and for the per-ticker fan-out.
    pub symbols: SymbolTable,
    /// News lookback window in days.
    pub news_lookback_days: u64,
    /// Price lookback window in days.
    pub price_lookback_days: u64,
    /// How many listing pages to walk.
    pub pages: u32,
    /// Whether to fetch each article page for its body text.
    pub fetch_bodies: bool,
    /// Path of the CSV news store.
    pub store_path: PathBuf,
    /// Directory for charts and the recommendations summary.
    pub out_dir: PathBuf,
    /// Thresholds for the trend rule.
    pub thresholds: TrendThresholds,
    /// Anchors the news lookback window to a fixed date instead of today.
    pub as_of: Option<NaiveDate>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            symbols: SymbolTable::automotive(),
            news_lookback_days: 14,
            price_lookback_days: 30,
            pages: 1,
            fetch_bodies: true,
            store_path: PathBuf::from("parsed_news.csv"),
            out_dir: PathBuf::from("out"),
            thresholds: TrendThresholds::default(),
            as_of: None,
        }
    }
}

/// Per-ticker result of the price/chart/trend leg.
#[derive(Debug, Clone)]
pub struct TickerOutcome {
    /// The ticker this outcome belongs to.
    pub symbol: String,
    /// How many price points the window produced.
    pub points: usize,
    /// Path of the rendered chart, when one was produced.
    pub chart: Option<PathBuf>,
    /// The trend report, when the series supported one.
    pub report: Option<TrendReport>,
    /// Why the ticker produced no recommendation, when it didn't.
    pub skipped: Option<String>,
}

/// What a run produced, for the caller to print or inspect.
#[derive(Debug)]
pub struct RunSummary {
    /// Articles scraped this run.
    pub articles: usize,
    /// How many of them matched at least one ticker.
    pub matched_articles: usize,
    /// The mention matrix over the whole store.
    pub matrix: MentionMatrix,
    /// One outcome per configured ticker.
    pub outcomes: Vec<TickerOutcome>,
    /// Path of the recommendations summary file.
    pub recommendations_path: PathBuf,
}

/// Runs the full pipeline: scrape, match and store the news, build the
/// mention matrix, then fetch, chart and analyze each ticker and write the
/// recommendations file.
///
/// # Errors
///
/// Returns the underlying error when a shared setup step fails: the news
/// listing cannot be fetched or parsed, or the store cannot be written or
/// read. Per-ticker failures never abort the run.
pub async fn run(client: &Client, cfg: &PipelineConfig) -> Result<RunSummary, Error> {
    let mut builder = NewsBuilder::new(client)
        .lookback_days(cfg.news_lookback_days)
        .pages(cfg.pages)
        .fetch_bodies(cfg.fetch_bodies);
    if let Some(date) = cfg.as_of {
        builder = builder.as_of(date);
    }
    let articles = builder.fetch().await?;
    info!(count = articles.len(), "articles in window");

    let matcher = SymbolMatcher::new(&cfg.symbols)?;
    let tagged: Vec<TaggedArticle> = articles
        .into_iter()
        .map(|article| {
            let tickers = matcher.match_article(&article);
            TaggedArticle { article, tickers }
        })
        .collect();
    let matched_articles = tagged.iter().filter(|t| !t.tickers.is_empty()).count();
    info!(
        matched = matched_articles,
        total = tagged.len(),
        "symbol matching done"
    );

    let store = NewsStore::new(&cfg.store_path);
    store.append(&tagged)?;
    let stored = store.load_all()?;
    let matrix = MentionMatrix::build(&stored, &cfg.symbols);

    let tickers = cfg.symbols.tickers();
    let outcomes = join_all(
        tickers
            .iter()
            .map(|symbol| analyze_ticker(client, cfg, symbol.clone())),
    )
    .await;

    let recommendations_path = write_recommendations(cfg, &outcomes)?;

    Ok(RunSummary {
        articles: tagged.len(),
        matched_articles,
        matrix,
        outcomes,
        recommendations_path,
    })
}

/// Fetch, chart and analyze one ticker. Never fails; failures land in the
/// outcome's `skipped` reason.
async fn analyze_ticker(client: &Client, cfg: &PipelineConfig, symbol: String) -> TickerOutcome {
    let series = match PriceHistoryBuilder::new(client, &symbol)
        .lookback_days(cfg.price_lookback_days)
        .fetch()
        .await
    {
        Ok(series) => series,
        Err(e) => {
            warn!(symbol = %symbol, error = %e, "price fetch failed, skipping ticker");
            return TickerOutcome {
                symbol,
                points: 0,
                chart: None,
                report: None,
                skipped: Some(e.to_string()),
            };
        }
    };

    let chart = match chart::render_price_volume(&cfg.out_dir, &symbol, &series) {
        Ok(path) => path,
        Err(e) => {
            // A failed drawing loses the artifact, not the recommendation.
            error!(symbol = %symbol, error = %e, "chart render failed");
            None
        }
    };

    match trend::analyze(&symbol, &series, &cfg.thresholds) {
        Ok(report) => {
            info!(
                symbol = %symbol,
                change_pct = report.change_pct,
                recommendation = %report.recommendation,
                "trend analyzed"
            );
            TickerOutcome {
                symbol,
                points: series.len(),
                chart,
                report: Some(report),
                skipped: None,
            }
        }
        Err(e) => {
            warn!(symbol = %symbol, error = %e, "trend analysis skipped");
            TickerOutcome {
                symbol,
                points: series.len(),
                chart,
                report: None,
                skipped: Some(e.to_string()),
            }
        }
    }
}

fn write_recommendations(
    cfg: &PipelineConfig,
    outcomes: &[TickerOutcome],
) -> Result<PathBuf, Error> {
    std::fs::create_dir_all(&cfg.out_dir)?;
    let path = cfg.out_dir.join("recommendations.txt");

    let mut lines = String::new();
    for outcome in outcomes {
        match (&outcome.report, &outcome.skipped) {
            (Some(report), _) => lines.push_str(&format!(
                "{}: {} ({:+.2}% over {} sessions)\n",
                outcome.symbol, report.recommendation, report.change_pct, outcome.points
            )),
            (None, Some(reason)) => {
                lines.push_str(&format!("{}: skipped - {reason}\n", outcome.symbol));
            }
            (None, None) => {
                lines.push_str(&format!("{}: skipped\n", outcome.symbol));
            }
        }
    }

    std::fs::write(&path, lines)?;
    Ok(path)
}
