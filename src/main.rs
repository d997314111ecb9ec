use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use page_summarizer::{
    config::{Config, ScrapingSettings, DEFAULT_MODEL},
    logging::setup_logging,
    summarizer::WebSummarizer,
};

/// Web Scraper and Summarizer - generate AI-powered summaries of websites
#[derive(Parser, Debug)]
#[command(name = "page-summarizer", version)]
#[command(after_help = "Examples:
  page-summarizer -u \"https://example.com\"
  page-summarizer --url \"https://news.ycombinator.com\" --model \"gpt-4o-mini\"
  page-summarizer -u \"https://blog.example.com\" --max-tokens 1500 --temperature 0.3
  page-summarizer -u \"https://docs.example.com\" --timeout 60 --retries 5")]
struct Cli {
    /// URL to scrape and summarize
    #[arg(short, long)]
    url: String,

    /// OpenAI model to use
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Maximum tokens for the summary
    #[arg(long, default_value_t = 1000)]
    max_tokens: u32,

    /// Temperature for AI response (0.0-1.0)
    #[arg(long, default_value_t = 0.7)]
    temperature: f32,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Maximum retry attempts
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    retries: u32,

    /// Base delay between retries in seconds
    #[arg(long, default_value_t = 1.0)]
    retry_delay: f64,

    /// Replace the default system prompt sent to the model
    #[arg(long)]
    system_prompt: Option<String>,

    /// Output file to save summary (default: print to console)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Suppress logging output
    #[arg(short, long)]
    quiet: bool,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.quiet, cli.verbose);

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("OPENAI_API_KEY environment variable not found! ({})", e);
            tracing::error!("Please set your OpenAI API key in the .env file or as an environment variable.");
            return ExitCode::FAILURE;
        }
    };

    let Ok(retry_delay) = Duration::try_from_secs_f64(cli.retry_delay) else {
        tracing::error!("Invalid --retry-delay: {}", cli.retry_delay);
        return ExitCode::FAILURE;
    };

    let scraping = ScrapingSettings::default()
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_max_retries(cli.retries)
        .with_retry_delay(retry_delay);

    let summarizer = config
        .summarizer_settings()
        .with_model(cli.model.as_str())
        .with_max_tokens(cli.max_tokens)
        .with_temperature(cli.temperature);

    tracing::info!("Starting to scrape and summarize: {}", cli.url);
    println!("🌐 Scraping and summarizing: {}", cli.url);
    println!("{}", "=".repeat(60));

    let result = match WebSummarizer::from_settings(scraping, summarizer) {
        Ok(pipeline) => pipeline.summarize_url(&cli.url, cli.system_prompt.as_deref()).await,
        Err(e) => Err(e),
    };

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            tracing::debug!("Pipeline failed: {}", e);
            println!("❌ Failed to generate summary");
            return ExitCode::FAILURE;
        }
    };

    println!("📝 SUMMARY:");
    println!("{}", "-".repeat(40));
    println!("{}", summary);
    println!("{}", "-".repeat(40));

    if let Some(path) = &cli.output {
        match write_summary(path, &cli.url, &summary) {
            Ok(()) => println!("💾 Summary saved to: {}", path.display()),
            Err(e) => {
                tracing::error!("Failed to save summary to {}: {}", path.display(), e);
                println!("❌ Failed to save summary to {}", path.display());
            }
        }
    }

    println!("✅ Summary generated successfully!");
    ExitCode::SUCCESS
}

fn write_summary(path: &Path, url: &str, summary: &str) -> std::io::Result<()> {
    std::fs::write(path, format!("# Summary of {}\n\n{}", url, summary))
}
