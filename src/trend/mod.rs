//! Trend signal and recommendation mapping.
//!
//! The rule is a single-window percentage change between the first and last
//! close of the series. Thresholds are configuration, not inline constants,
//! so tests can pin them independently of the defaults.

use serde::Serialize;

use crate::core::Error;
use crate::history::PricePoint;

/// Percentage thresholds for the recommendation rule, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendThresholds {
    /// Change at or above this recommends BUY.
    pub buy_pct: f64,
    /// Change at or below the negation of this recommends AVOID.
    pub avoid_pct: f64,
}

impl Default for TrendThresholds {
    fn default() -> Self {
        Self {
            buy_pct: 2.0,
            avoid_pct: 2.0,
        }
    }
}

/// The three-way verdict for one ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    Buy,
    Wait,
    Avoid,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Recommendation::Buy => "BUY",
            Recommendation::Wait => "WAIT",
            Recommendation::Avoid => "AVOID",
        })
    }
}

/// The computed signal and its inputs, for logging and the summary file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    /// Ticker the series belongs to.
    pub symbol: String,
    /// First close in the window.
    pub start_close: f64,
    /// Last close in the window.
    pub end_close: f64,
    /// Percentage change between them.
    pub change_pct: f64,
    /// The verdict under the supplied thresholds.
    pub recommendation: Recommendation,
}

/// Computes the trend signal for one ticker's chronological series.
///
/// `change_pct ≥ +buy_pct` → BUY, `change_pct ≤ −avoid_pct` → AVOID,
/// anything between → WAIT. Both boundaries are inclusive, so a rise of
/// exactly the threshold recommends BUY.
///
/// # Errors
///
/// Returns `Error::InsufficientData` when the series has fewer than 2 points,
/// or when the first close is 0 and the change is undefined.
pub fn analyze(
    symbol: &str,
    series: &[PricePoint],
    thresholds: &TrendThresholds,
) -> Result<TrendReport, Error> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(f), Some(l)) if series.len() >= 2 => (f, l),
        _ => {
            return Err(Error::InsufficientData {
                symbol: symbol.to_string(),
                points: series.len(),
            });
        }
    };

    if first.close == 0.0 {
        return Err(Error::InsufficientData {
            symbol: symbol.to_string(),
            points: series.len(),
        });
    }

    let change_pct = (last.close - first.close) / first.close * 100.0;
    let recommendation = if change_pct >= thresholds.buy_pct {
        Recommendation::Buy
    } else if change_pct <= -thresholds.avoid_pct {
        Recommendation::Avoid
    } else {
        Recommendation::Wait
    };

    Ok(TrendReport {
        symbol: symbol.to_string(),
        start_close: first.close,
        end_close: last.close,
        change_pct,
        recommendation,
    })
}
