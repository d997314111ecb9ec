//! The fetch, clean, summarize pipeline for one URL.

use tracing::{error, info};
use url::Url;

use crate::config::{ScrapingSettings, SummarizerSettings};
use crate::error::{AppError, Result};
use crate::llm::{OpenAiSummarizer, Summarize};
use crate::prompt::build_prompt;
use crate::scraper::{PageFetcher, WebsiteScraper};

/// Parses `raw` and insists on both a scheme and a host.
pub fn validate_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| AppError::InvalidUrl(format!("{}: {}", raw, e)))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(AppError::InvalidUrl(format!("{}: missing host", raw))),
    }
}

/// Runs each stage once, in order; only the fetcher retries internally.
pub struct WebSummarizer<F, S> {
    fetcher: F,
    summarizer: S,
}

impl WebSummarizer<WebsiteScraper, OpenAiSummarizer> {
    pub fn from_settings(scraping: ScrapingSettings, summarizer: SummarizerSettings) -> Result<Self> {
        Ok(Self::new(WebsiteScraper::new(scraping)?, OpenAiSummarizer::new(summarizer)))
    }
}

impl<F, S> WebSummarizer<F, S>
where
    F: PageFetcher,
    S: Summarize,
{
    pub fn new(fetcher: F, summarizer: S) -> Self {
        Self { fetcher, summarizer }
    }

    pub async fn summarize_url(&self, url: &str, system_prompt: Option<&str>) -> Result<String> {
        let url = validate_url(url).inspect_err(|e| error!("{}", e))?;

        let page = self.fetcher.fetch(&url).await?;
        info!(
            "Successfully scraped {} (title: {}, {} words)",
            url,
            page.title(),
            page.word_count()
        );

        let prompt = build_prompt(&page, system_prompt);
        let summary = self.summarizer.summarize(&prompt).await?;
        info!("Successfully generated summary for {}", url);

        Ok(summary)
    }
}
