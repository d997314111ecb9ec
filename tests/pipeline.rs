//! End-to-end pipeline tests: a mock website and a mock provider

use std::time::Duration;

use page_summarizer::config::{ScrapingSettings, SummarizerSettings};
use page_summarizer::error::AppError;
use page_summarizer::llm::OpenAiSummarizer;
use page_summarizer::scraper::WebsiteScraper;
use page_summarizer::summarizer::WebSummarizer;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SITE: &str = "<html><head><title>Test Site</title></head><body><p>Test content</p></body></html>";

fn pipeline(provider: &MockServer) -> WebSummarizer<WebsiteScraper, OpenAiSummarizer> {
    WebSummarizer::from_settings(
        ScrapingSettings::default()
            .with_max_retries(2)
            .with_retry_delay(Duration::from_millis(10)),
        SummarizerSettings::new("sk-test").with_base_url(format!("{}/v1", provider.uri())),
    )
    .unwrap()
}

async fn mount_provider(provider: &MockServer, reply: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": reply } }]
        })))
        .expect(expected_calls)
        .mount(provider)
        .await;
}

#[tokio::test]
async fn test_url_to_summary() {
    let site = MockServer::start().await;
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SITE, "text/html"))
        .expect(1)
        .mount(&site)
        .await;
    mount_provider(&provider, "# Test Site\n\nA page with test content.", 1).await;

    let summary = pipeline(&provider)
        .summarize_url(&format!("{}/", site.uri()), None)
        .await
        .unwrap();
    assert_eq!(summary, "# Test Site\n\nA page with test content.");

    let requests = provider.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(user.contains("titled \"Test Site\""));
    assert!(user.ends_with("Test content"));
}

#[tokio::test]
async fn test_scrape_failure_never_calls_provider() {
    let site = MockServer::start().await;
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&site)
        .await;
    mount_provider(&provider, "unused", 0).await;

    let result = pipeline(&provider)
        .summarize_url(&format!("{}/", site.uri()), None)
        .await;
    assert!(matches!(result, Err(AppError::FetchError(_))));
}

#[tokio::test]
async fn test_invalid_url_makes_no_requests() {
    let provider = MockServer::start().await;
    mount_provider(&provider, "unused", 0).await;

    let result = pipeline(&provider).summarize_url("www.example.com", None).await;
    assert!(matches!(result, Err(AppError::InvalidUrl(_))));
}
