pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod logging;
pub mod page;
pub mod prompt;
pub mod scraper;
pub mod summarizer;

use std::sync::Arc;
use config::{Config, ScrapingSettings};

/// Read-only state handed to every web handler. Each request builds its own
/// pipeline from it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub scraping: ScrapingSettings,
}
