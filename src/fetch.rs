use std::time::Duration;

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;
use tracing::debug;

use crate::utils::error::AppError;

// Several of the tracked stores refuse requests without browser-like headers.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";
const ACCEPT_LANGUAGE_VALUE: &str = "es-PE,es;q=0.9,en;q=0.8";

const RETRY_ATTEMPTS: usize = 2;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Shared HTTP fetcher for listing pages. Every request is bounded by the
/// configured timeout; transient failures get a couple of retries before the
/// site is given up on for this run.
pub struct PageFetcher {
    client: Client,
    retry_attempts: usize,
    retry_delay: Duration,
}

impl PageFetcher {
    pub fn new(timeout: Duration) -> crate::Result<Self> {
        Self::with_retry(timeout, RETRY_ATTEMPTS, RETRY_DELAY)
    }

    pub fn with_retry(
        timeout: Duration,
        retry_attempts: usize,
        retry_delay: Duration,
    ) -> crate::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(PageFetcher {
            client,
            retry_attempts,
            retry_delay,
        })
    }

    /// Fetch a listing page body for `site`. Non-2xx responses count as
    /// fetch failures, like network errors and timeouts.
    pub async fn fetch(&self, site: &str, url: &str) -> Result<String, AppError> {
        let strategy = FixedInterval::new(self.retry_delay).take(self.retry_attempts);

        let body = Retry::spawn(strategy, || async {
            debug!(site, url, "fetching listing page");
            let response = self.client.get(url).send().await?.error_for_status()?;
            response.text().await
        })
        .await
        .map_err(|source| AppError::Fetch {
            site: site.to_string(),
            source,
        })?;

        Ok(body)
    }
}
