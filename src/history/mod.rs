mod model;
mod wire;

pub use model::PricePoint;

use chrono::{DateTime, Days, Utc};
use tracing::debug;

use crate::core::client::RetryConfig;
use crate::core::{Client, Error};

/// A builder for fetching a daily close/volume series for one symbol.
pub struct PriceHistoryBuilder {
    client: Client,
    symbol: String,
    lookback_days: u64,
    end: Option<DateTime<Utc>>,
    retry_override: Option<RetryConfig>,
}

impl PriceHistoryBuilder {
    /// Creates a new builder for `symbol`.
    pub fn new(client: &Client, symbol: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            symbol: symbol.into(),
            lookback_days: 30,
            end: None,
            retry_override: None,
        }
    }

    /// Sets the trailing window of days to request (default 30).
    #[must_use]
    pub fn lookback_days(mut self, days: u64) -> Self {
        self.lookback_days = days;
        self
    }

    /// Anchors the window's end instead of now. Mostly useful in tests.
    #[must_use]
    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Overrides the default retry policy for this call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Fetch the series, sorted by date ascending with duplicate dates collapsed.
    ///
    /// The series may be shorter than the lookback window (market holidays,
    /// recent listings). Rows without a close price are dropped; a missing
    /// volume becomes 0.
    ///
    /// # Errors
    ///
    /// Returns `Error::PriceUnavailable` when the provider reports an error or
    /// the window holds no usable rows, `Error::Status` on a non-success HTTP
    /// status, and `Error::Http` on transport failures.
    pub async fn fetch(self) -> Result<Vec<PricePoint>, Error> {
        let end = self.end.unwrap_or_else(Utc::now);
        let start = end
            .checked_sub_days(Days::new(self.lookback_days))
            .ok_or(Error::InvalidDates)?;

        let mut url = self.client.base_chart().join(&self.symbol)?;
        {
            let mut qp = url.query_pairs_mut();
            qp.append_pair("period1", &start.timestamp().to_string());
            qp.append_pair("period2", &end.timestamp().to_string());
            qp.append_pair("interval", "1d");
            qp.append_pair("includePrePost", "false");
        }

        let resp = self
            .client
            .send_with_retry(
                self.client.http().get(url.clone()),
                self.retry_override.as_ref(),
            )
            .await?;
        if !resp.status().is_success() {
            return Err(Error::Status {
                status: resp.status().as_u16(),
                url: url.to_string(),
            });
        }
        let body = resp.text().await?;

        decode_chart(&self.symbol, &body)
    }
}

fn decode_chart(symbol: &str, body: &str) -> Result<Vec<PricePoint>, Error> {
    let unavailable = |reason: String| Error::PriceUnavailable {
        symbol: symbol.to_string(),
        reason,
    };

    let parsed: wire::ChartEnvelope = serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("chart json for {symbol}: {e}")))?;

    let chart = parsed
        .chart
        .ok_or_else(|| unavailable("missing chart node".into()))?;

    if let Some(err) = chart.error {
        return Err(unavailable(format!("{} - {}", err.code, err.description)));
    }

    let result = chart
        .result
        .ok_or_else(|| unavailable("missing result".into()))?;
    let r0 = result
        .into_iter()
        .next()
        .ok_or_else(|| unavailable("empty result".into()))?;

    let ts = r0.timestamp.unwrap_or_default();
    let quote = r0
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| unavailable("missing quote block".into()))?;

    let mut points: Vec<PricePoint> = Vec::with_capacity(ts.len());
    for (i, &t) in ts.iter().enumerate() {
        let Some(close) = quote.close.get(i).copied().flatten() else {
            continue;
        };
        let Some(date) = DateTime::<Utc>::from_timestamp(t, 0).map(|dt| dt.date_naive()) else {
            continue;
        };
        points.push(PricePoint {
            date,
            close,
            volume: quote.volume.get(i).copied().flatten().unwrap_or(0),
        });
    }

    if points.is_empty() {
        return Err(unavailable("no rows in window".into()));
    }

    // Invariant: distinct, monotonically increasing dates.
    points.sort_by_key(|p| p.date);
    points.dedup_by_key(|p| p.date);

    debug!(symbol, points = points.len(), "decoded price series");
    Ok(points)
}
