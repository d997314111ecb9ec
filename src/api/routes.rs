use axum::{
    routing::{get, post},
    Router,
    extract::{Form, Json, State},
    response::{Html, IntoResponse},
};
use tower_http::cors::{CorsLayer, Any};
use chrono::Utc;
use tracing::{info, warn};

use crate::AppState;
use crate::api::form::{render_page, EMPTY_URL_MESSAGE, FAILURE_MESSAGE};
use crate::api::models::{SummarizeForm, SummarizeRequest, SummarizeResponse};
use crate::api::response;
use crate::error::Result;
use crate::summarizer::WebSummarizer;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(submit_form))
        .route("/api/summarize", post(summarize_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

/// Builds a fresh pipeline for this request only.
async fn run_pipeline(state: &AppState, url: &str, system_prompt: Option<&str>) -> Result<String> {
    let start_time = std::time::Instant::now();

    let pipeline = WebSummarizer::from_settings(
        state.scraping.clone(),
        state.config.summarizer_settings(),
    )?;
    let result = pipeline.summarize_url(url, system_prompt).await;

    info!("Request processing for {} took {:?}", url, start_time.elapsed());
    result
}

async fn index() -> Html<String> {
    Html(render_page("", None, None))
}

async fn submit_form(
    State(state): State<AppState>,
    Form(form): Form<SummarizeForm>,
) -> Html<String> {
    let url = form.url.trim();
    if url.is_empty() {
        return Html(render_page(url, None, Some(EMPTY_URL_MESSAGE)));
    }

    info!("Processing form submission for URL: {}", url);
    match run_pipeline(&state, url, None).await {
        Ok(summary) => Html(render_page(url, Some(&summary), None)),
        Err(err) => {
            warn!("Form submission for {} failed: {}", url, err);
            Html(render_page(url, None, Some(FAILURE_MESSAGE)))
        }
    }
}

async fn summarize_handler(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> impl IntoResponse {
    info!("Processing API request for URL: {}", req.url);

    match run_pipeline(&state, &req.url, req.system_prompt.as_deref()).await {
        Ok(summary) => response::success(SummarizeResponse {
            url: req.url,
            summary,
            summarized_at: Utc::now(),
        }),
        Err(err) => {
            warn!("API request for {} failed: {}", req.url, err);
            response::from_app_error(&err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ScrapingSettings};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState {
            config: Arc::new(Config {
                openai_api_key: "sk-test".to_string(),
                openai_base_url: "http://127.0.0.1:9/v1".to_string(),
            }),
            scraping: ScrapingSettings::default(),
        }
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn index_serves_form() {
        let app = create_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("<form method=\"post\">"));
    }

    #[tokio::test]
    async fn empty_form_submission_asks_for_url() {
        let app = create_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("url=++"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains(EMPTY_URL_MESSAGE));
    }

    #[tokio::test]
    async fn invalid_url_form_submission_shows_error() {
        let app = create_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("url=example.com"))
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = body_string(response).await;
        assert!(body.contains(FAILURE_MESSAGE));
        assert!(body.contains("value=\"example.com\""));
    }

    #[tokio::test]
    async fn api_rejects_invalid_url_with_bad_request() {
        let app = create_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/summarize")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"url":"not a url"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(json["data"].is_null());
        assert_eq!(json["meta"]["status"], "error");
    }
}
