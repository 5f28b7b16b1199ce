//! Chart API response mapping (only the fields we need).

use serde::Deserialize;

#[derive(Deserialize)]
pub(super) struct ChartEnvelope {
    pub chart: Option<ChartNode>,
}

#[derive(Deserialize)]
pub(super) struct ChartNode {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Deserialize)]
pub(super) struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Deserialize)]
pub(super) struct ChartResult {
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Deserialize)]
pub(super) struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteBlock>,
}

#[derive(Deserialize)]
pub(super) struct QuoteBlock {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}
