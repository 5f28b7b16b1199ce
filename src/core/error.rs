use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// A page was retrieved but its expected structural markers were absent.
    #[error("Parse error: {0}")]
    Parse(String),

    /// An alias pattern in the symbol table failed to compile.
    #[error("Alias pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// The news store file is missing, has the wrong header, or cannot be read.
    #[error("Store read error: {0}")]
    StoreRead(String),

    /// A low-level I/O failure while writing or replacing the news store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A CSV row could not be written or read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The market-data provider returned no usable data for a symbol/window.
    #[error("No price data for {symbol}: {reason}")]
    PriceUnavailable {
        /// The ticker symbol the request was for.
        symbol: String,
        /// What the provider reported, or why the response was unusable.
        reason: String,
    },

    /// A chart could not be rendered.
    #[error("Render error: {0}")]
    Render(String),

    /// A price series is too short to compute a trend signal.
    #[error("Insufficient data for {symbol}: {points} point(s), need at least 2")]
    InsufficientData {
        /// The ticker symbol the series belongs to.
        symbol: String,
        /// How many points the series actually had.
        points: usize,
    },

    /// An invalid date range was provided (start must be before end).
    #[error("invalid date range: start must be before end")]
    InvalidDates,
}
