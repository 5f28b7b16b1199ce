mod model;
mod scrape;

pub use model::Article;

use chrono::{Days, NaiveDate, Utc};
use tracing::{info, warn};

use crate::core::client::RetryConfig;
use crate::core::{Client, Error};

/// A builder for fetching recent articles from the news listing.
pub struct NewsBuilder {
    client: Client,
    lookback_days: u64,
    pages: u32,
    fetch_bodies: bool,
    as_of: Option<NaiveDate>,
    retry_override: Option<RetryConfig>,
}

impl NewsBuilder {
    /// Creates a new `NewsBuilder` against the client's listing URL.
    pub fn new(client: &Client) -> Self {
        Self {
            client: client.clone(),
            lookback_days: 14,
            pages: 1,
            fetch_bodies: true,
            as_of: None,
            retry_override: None,
        }
    }

    /// Sets the trailing window of days to keep (default 14).
    #[must_use]
    pub fn lookback_days(mut self, days: u64) -> Self {
        self.lookback_days = days;
        self
    }

    /// Sets how many listing pages to walk (default 1).
    #[must_use]
    pub fn pages(mut self, pages: u32) -> Self {
        self.pages = pages.max(1);
        self
    }

    /// Disables fetching each article page for its body text; the headline is
    /// used as the body instead.
    #[must_use]
    pub fn fetch_bodies(mut self, yes: bool) -> Self {
        self.fetch_bodies = yes;
        self
    }

    /// Anchors the lookback window to a fixed date instead of today.
    #[must_use]
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Overrides the default retry policy for this call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Fetch the listing page(s) and return articles within the lookback window.
    ///
    /// # Errors
    ///
    /// Returns `Error::Http`/`Error::Status` when the listing cannot be
    /// retrieved and `Error::Parse` when the page has no recognizable article
    /// markup. Zero articles inside the window is a valid empty result. A
    /// failed article-body fetch is logged and falls back to the headline.
    pub async fn fetch(self) -> Result<Vec<Article>, Error> {
        let today = self.as_of.unwrap_or_else(|| Utc::now().date_naive());
        let cutoff = today
            .checked_sub_days(Days::new(self.lookback_days))
            .ok_or(Error::InvalidDates)?;

        let mut items = Vec::new();
        for page in 1..=self.pages {
            let mut url = self.client.base_listing().clone();
            if page > 1 {
                url.query_pairs_mut()
                    .append_pair("page", &page.to_string());
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

            let page_items = scrape::parse_listing(&body, self.client.base_listing())?;
            let empty = page_items.is_empty();
            items.extend(page_items);
            if empty {
                break;
            }
        }

        let total = items.len();
        items.retain(|i| i.published_at.unwrap_or(today) >= cutoff);
        info!(
            kept = items.len(),
            scanned = total,
            %cutoff,
            "parsed news listing"
        );

        let mut articles = Vec::with_capacity(items.len());
        for item in items {
            let body = if self.fetch_bodies {
                match self.fetch_body(&item.url).await {
                    Ok(text) if !text.is_empty() => text,
                    Ok(_) => {
                        warn!(url = %item.url, "article page had no extractable body");
                        item.headline.clone()
                    }
                    Err(e) => {
                        warn!(url = %item.url, error = %e, "article body fetch failed");
                        item.headline.clone()
                    }
                }
            } else {
                item.headline.clone()
            };

            articles.push(Article {
                headline: item.headline,
                published_at: item.published_at.unwrap_or(today),
                body,
                source_url: item.url,
            });
        }

        Ok(articles)
    }

    async fn fetch_body(&self, url: &str) -> Result<String, Error> {
        let url = url::Url::parse(url)?;
        let resp = self
            .client
            .send_with_retry(self.client.http().get(url.clone()), self.retry_override.as_ref())
            .await?;
        if !resp.status().is_success() {
            return Err(Error::Status {
                status: resp.status().as_u16(),
                url: url.to_string(),
            });
        }
        let html = resp.text().await?;
        scrape::parse_article_body(&html)
    }
}
