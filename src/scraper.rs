//! Page fetching with bounded retries and exponential backoff.

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::ScrapingSettings;
use crate::error::{AppError, Result};
use crate::page::FetchedPage;

const MAX_REDIRECTS: usize = 10;

/// Fetches one already-validated URL and returns its cleaned content.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage>;
}

/// Wait before the attempt following failed attempt `attempt` (0-based):
/// `base * 2^attempt`.
pub fn retry_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

pub struct WebsiteScraper {
    client: Client,
    settings: ScrapingSettings,
}

impl WebsiteScraper {
    pub fn new(settings: ScrapingSettings) -> Result<Self> {
        let client = ClientBuilder::new()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| AppError::FetchError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ScrapingSettings {
        &self.settings
    }

    async fn fetch_once(&self, url: &Url) -> std::result::Result<FetchedPage, reqwest::Error> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?;
        debug!("Received {} bytes from {} (status {})", body.len(), url, status);

        Ok(FetchedPage::from_response(
            url.as_str(),
            &body,
            status,
            content_type.as_deref(),
            &self.settings,
        ))
    }
}

#[async_trait]
impl PageFetcher for WebsiteScraper {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        let attempts = self.settings.max_retries.max(1);
        let mut last_error = String::new();

        for attempt in 0..attempts {
            info!("Scraping {} (attempt {}/{})", url, attempt + 1, attempts);

            match self.fetch_once(url).await {
                Ok(page) => return Ok(page),
                // Malformed request, not a transient failure.
                Err(e) if e.is_builder() => {
                    error!("Unexpected error scraping {}: {}", url, e);
                    return Err(AppError::FetchError(format!("Unexpected error scraping {}: {}", url, e)));
                }
                Err(e) => {
                    warn!("Request failed on attempt {}: {}", attempt + 1, e);
                    last_error = e.to_string();

                    if attempt + 1 < attempts {
                        let delay = retry_delay(self.settings.retry_delay, attempt);
                        debug!("Retrying {} in {:?}", url, delay);
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        error!("Failed to scrape {} after {} attempts", url, attempts);
        Err(AppError::FetchError(format!(
            "Failed to scrape {} after {} attempts: {}",
            url, attempts, last_error
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_delay_doubles_per_attempt() {
        let base = Duration::from_secs(1);
        assert_eq!(retry_delay(base, 0), Duration::from_secs(1));
        assert_eq!(retry_delay(base, 1), Duration::from_secs(2));
        assert_eq!(retry_delay(base, 2), Duration::from_secs(4));
        assert_eq!(retry_delay(base, 3), Duration::from_secs(8));
    }

    #[test]
    fn retry_delay_scales_fractional_base() {
        let base = Duration::from_millis(250);
        assert_eq!(retry_delay(base, 0), Duration::from_millis(250));
        assert_eq!(retry_delay(base, 2), Duration::from_secs(1));
    }

    #[test]
    fn retry_delay_saturates_instead_of_overflowing() {
        assert_eq!(retry_delay(Duration::from_secs(u64::MAX / 2), 4), Duration::MAX);
        assert_eq!(retry_delay(Duration::from_secs(1), 64), Duration::from_secs(u32::MAX as u64));
    }

    #[test]
    fn builds_client_from_settings() {
        let scraper = WebsiteScraper::new(ScrapingSettings::default()).unwrap();
        assert_eq!(scraper.settings().max_retries, 3);
    }

    #[tokio::test]
    async fn unsupported_scheme_fails_without_retrying() {
        let settings = ScrapingSettings::default()
            .with_max_retries(3)
            .with_retry_delay(Duration::from_secs(60));
        let scraper = WebsiteScraper::new(settings).unwrap();
        let url = Url::parse("ftp://example.com/file").unwrap();

        // A retry would sleep for a minute; the timeout proves it never happens.
        let result = tokio::time::timeout(Duration::from_secs(5), scraper.fetch(&url))
            .await
            .expect("builder errors must not be retried");
        assert!(matches!(result, Err(AppError::FetchError(_))));
    }
}
