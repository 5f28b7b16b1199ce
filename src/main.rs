use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;
use url::Url;

use motorwatch::{Client, PipelineConfig, SymbolTable, TrendThresholds};

/// Correlate automotive news mentions with short-term stock trends.
#[derive(Parser, Debug)]
#[command(name = "motorwatch", version, about)]
struct Cli {
    /// Tickers to track (comma-separated). Defaults to F, GM and TSLA.
    #[arg(long, value_delimiter = ',')]
    tickers: Option<Vec<String>>,

    /// News lookback window in days.
    #[arg(long, default_value_t = 14)]
    news_days: u64,

    /// Price lookback window in days.
    #[arg(long, default_value_t = 30)]
    price_days: u64,

    /// How many listing pages to walk.
    #[arg(long, default_value_t = 1)]
    pages: u32,

    /// Path of the CSV news store.
    #[arg(long, default_value = "parsed_news.csv")]
    store: PathBuf,

    /// Directory for charts and the recommendations summary.
    #[arg(long, env = "MOTORWATCH_OUT_DIR", default_value = "out")]
    out_dir: PathBuf,

    /// Percentage rise that recommends BUY.
    #[arg(long, default_value_t = 2.0)]
    buy_threshold: f64,

    /// Percentage fall that recommends AVOID.
    #[arg(long, default_value_t = 2.0)]
    avoid_threshold: f64,

    /// Override the news listing URL.
    #[arg(long)]
    listing_url: Option<Url>,

    /// Override the chart API base URL.
    #[arg(long)]
    chart_url: Option<Url>,

    /// Skip fetching article pages; headlines double as bodies.
    #[arg(long)]
    no_bodies: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut client_builder = Client::builder();
    if let Some(url) = cli.listing_url {
        client_builder = client_builder.base_listing(url);
    }
    if let Some(url) = cli.chart_url {
        client_builder = client_builder.base_chart(url);
    }
    let client = match client_builder.build() {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let config = PipelineConfig {
        symbols: match cli.tickers {
            Some(tickers) => SymbolTable::from_tickers(tickers),
            None => SymbolTable::automotive(),
        },
        news_lookback_days: cli.news_days,
        price_lookback_days: cli.price_days,
        pages: cli.pages,
        fetch_bodies: !cli.no_bodies,
        store_path: cli.store,
        out_dir: cli.out_dir,
        thresholds: TrendThresholds {
            buy_pct: cli.buy_threshold,
            avoid_pct: cli.avoid_threshold,
        },
        as_of: None,
    };

    match motorwatch::pipeline::run(&client, &config).await {
        Ok(summary) => {
            println!(
                "\n{} article(s) this run, {} mentioning a tracked ticker\n",
                summary.articles, summary.matched_articles
            );
            print!("{}", summary.matrix);
            println!();
            for outcome in &summary.outcomes {
                match (&outcome.report, &outcome.skipped) {
                    (Some(report), _) => println!(
                        "{}: {} ({:+.2}%)",
                        outcome.symbol, report.recommendation, report.change_pct
                    ),
                    (None, Some(reason)) => println!("{}: skipped - {reason}", outcome.symbol),
                    (None, None) => println!("{}: skipped", outcome.symbol),
                }
            }
            println!(
                "\nRecommendations saved to {}",
                summary.recommendations_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "pipeline run failed");
            ExitCode::FAILURE
        }
    }
}
