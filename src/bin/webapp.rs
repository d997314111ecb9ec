use std::sync::Arc;
use tokio::net::TcpListener;
use page_summarizer::{
    config::{ScrapingSettings, ServerConfig},
    api::routes::create_router,
    logging::setup_logging,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging(false, false);

    // Fails fast when OPENAI_API_KEY is missing
    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            tracing::error!("Please set your OpenAI API key in the .env file or as an environment variable.");
            return Err(e.into());
        }
    };
    let server_addr = config.server_addr;

    let app_state = AppState {
        config: Arc::new(config.provider),
        scraping: ScrapingSettings::default(),
    };

    let app = create_router(app_state);
    let listener = TcpListener::bind(server_addr).await?;

    tracing::info!("Listening on http://{}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
