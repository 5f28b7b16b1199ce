//! Public client surface + builder.
//! Internals are split into `retry` (policy types) and `constants` (UA + defaults).

mod constants;
mod retry;

pub use retry::{Backoff, RetryConfig};

use crate::core::Error;
use constants::{DEFAULT_BASE_CHART, DEFAULT_BASE_LISTING, DEFAULT_TIMEOUT_SECS, USER_AGENT};
use reqwest::Client as HttpClient;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Shared HTTP client for the news listing and the chart API.
///
/// Base URLs are overridable through the builder so tests can point the
/// pipeline at a mock server.
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
    base_listing: Url,
    base_chart: Url,
    retry: RetryConfig,
}

impl Default for Client {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl Client {
    /// Create a new builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &HttpClient {
        &self.http
    }
    pub(crate) fn base_listing(&self) -> &Url {
        &self.base_listing
    }
    pub(crate) fn base_chart(&self) -> &Url {
        &self.base_chart
    }

    /// Send a request, retrying transient failures per the active policy.
    ///
    /// Status-code handling beyond the retry filter is left to the caller.
    pub(crate) async fn send_with_retry(
        &self,
        req: reqwest::RequestBuilder,
        retry_override: Option<&RetryConfig>,
    ) -> Result<reqwest::Response, Error> {
        let policy = retry_override.unwrap_or(&self.retry);

        if !policy.enabled {
            return Ok(req.send().await?);
        }

        let mut attempt: u32 = 0;
        loop {
            let this_try = match req.try_clone() {
                Some(r) => r,
                // Non-clonable request bodies can't be retried; send once.
                None => return Ok(req.send().await?),
            };

            match this_try.send().await {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    if policy.should_retry_status(status) && attempt < policy.max_retries {
                        let delay = policy.delay_for(attempt);
                        debug!(status, attempt, ?delay, "retrying after status");
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Ok(resp);
                }
                Err(err) => {
                    if policy.should_retry_error(&err) && attempt < policy.max_retries {
                        let delay = policy.delay_for(attempt);
                        debug!(error = %err, attempt, ?delay, "retrying after error");
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(err.into());
                }
            }
        }
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct ClientBuilder {
    user_agent: Option<String>,
    base_listing: Option<Url>,
    base_chart: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry: Option<RetryConfig>,
}

impl ClientBuilder {
    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the news listing URL (e.g. a mock server in tests).
    pub fn base_listing(mut self, url: Url) -> Self {
        self.base_listing = Some(url);
        self
    }

    /// Override the chart API base (e.g. `https://query1.finance.yahoo.com/v8/finance/chart/`).
    pub fn base_chart(mut self, url: Url) -> Self {
        self.base_chart = Some(url);
        self
    }

    /// Set a global request timeout. Default: 10 seconds.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Override the default retry policy.
    pub fn retry_policy(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        let base_listing = match self.base_listing {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_LISTING)?,
        };
        let base_chart = match self.base_chart {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_CHART)?,
        };

        let http = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .timeout(
                self.timeout
                    .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            )
            .connect_timeout(self.connect_timeout.unwrap_or(Duration::from_secs(5)))
            .build()?;

        Ok(Client {
            http,
            base_listing,
            base_chart,
            retry: self.retry.unwrap_or_default(),
        })
    }
}
