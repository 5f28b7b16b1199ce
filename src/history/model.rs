use chrono::NaiveDate;
use serde::Serialize;

/// One daily observation for a ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    /// Trading day (UTC).
    pub date: NaiveDate,
    /// Daily close price.
    pub close: f64,
    /// Daily traded volume; 0 when the provider omitted it.
    pub volume: u64,
}
