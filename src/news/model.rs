use chrono::NaiveDate;
use serde::Serialize;

/// One article pulled from the news listing.
///
/// Identity within a run is the `source_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    /// The headline, with any inline timestamp stripped.
    pub headline: String,
    /// Publication date as reported by the listing.
    pub published_at: NaiveDate,
    /// Body text of the article, or the headline when no body was retrievable.
    pub body: String,
    /// Absolute link to the article page.
    pub source_url: String,
}
