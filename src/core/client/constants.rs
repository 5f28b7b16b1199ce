//! Centralized constants for default endpoints and UA.

/// Default desktop UA to avoid trivial bot blocking.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/122.0.0.0 Safari/537.36"
);

/// PR Newswire automotive listing page.
pub(crate) const DEFAULT_BASE_LISTING: &str =
    "https://www.prnewswire.com/news-releases/automotive-transportation-latest-news/automotive-list/";

/// Yahoo chart API base (symbol is appended).
pub(crate) const DEFAULT_BASE_CHART: &str = "https://query1.finance.yahoo.com/v8/finance/chart/";

/// Overall request timeout applied when the builder sets none.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 10;
