use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/117.0.0.0 Safari/537.36";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Tags dropped from the page body before its text is extracted.
pub const DEFAULT_REMOVE_ELEMENTS: [&str; 8] = [
    "script", "style", "img", "input", "nav", "header", "footer", "aside",
];

/// How a page is fetched and cleaned.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapingSettings {
    pub user_agent: String,
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// Total number of attempts, not counting from zero.
    pub max_retries: u32,
    /// Base delay for exponential backoff between attempts.
    pub retry_delay: Duration,
    pub remove_elements: Vec<String>,
}

impl Default for ScrapingSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
            remove_elements: DEFAULT_REMOVE_ELEMENTS.iter().map(|tag| tag.to_string()).collect(),
        }
    }
}

impl ScrapingSettings {
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_remove_elements<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remove_elements = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Model and credential used for the chat-completion call.
#[derive(Clone, PartialEq)]
pub struct SummarizerSettings {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub base_url: String,
}

// Keeps the credential out of logs.
impl std::fmt::Debug for SummarizerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummarizerSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl SummarizerSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 1000,
            temperature: 0.7,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Provider credential and endpoint, read from the environment.
#[derive(Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, env::VarError>,
    {
        let openai_api_key = lookup("OPENAI_API_KEY")?;
        if openai_api_key.trim().is_empty() {
            return Err(AppError::ConfigError("OPENAI_API_KEY is empty".to_string()));
        }

        let openai_base_url = lookup("OPENAI_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Config {
            openai_api_key,
            openai_base_url,
        })
    }

    /// Summarizer settings with this credential and endpoint and default model parameters.
    pub fn summarizer_settings(&self) -> SummarizerSettings {
        SummarizerSettings::new(self.openai_api_key.clone()).with_base_url(self.openai_base_url.clone())
    }
}

#[derive(Clone)]
pub struct ServerConfig {
    pub server_addr: SocketAddr,
    pub provider: Config,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        let provider = Config::load()?;
        Self::from_lookup(provider, |key| env::var(key))
    }

    pub fn from_lookup<F>(provider: Config, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, env::VarError>,
    {
        // Load server configuration with defaults
        let host = lookup("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = lookup("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        Ok(ServerConfig {
            server_addr: SocketAddr::new(ip, port),
            provider,
        })
    }
}
