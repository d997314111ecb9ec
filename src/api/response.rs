use serde::Serialize;
use axum::Json;
use axum::http::StatusCode;
use chrono::Utc;

use crate::error::AppError;

/// Envelope shared by every JSON endpoint.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub meta: ResponseMeta,
}

#[derive(Serialize)]
pub struct ResponseMeta {
    pub status: &'static str,
    pub status_code: u16,
    pub timestamp: String,
    pub message: Option<String>,
}

impl ResponseMeta {
    fn new(status: StatusCode, message: Option<String>) -> Self {
        Self {
            status: if status.is_success() { "success" } else { "error" },
            status_code: status.as_u16(),
            timestamp: Utc::now().to_rfc3339(),
            message,
        }
    }
}

pub type Reply<T> = (StatusCode, Json<ApiResponse<T>>);

pub fn success<T: Serialize>(data: T) -> Reply<T> {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: Some(data),
            meta: ResponseMeta::new(StatusCode::OK, None),
        }),
    )
}

pub fn error<T>(status: StatusCode, message: String) -> Reply<T> {
    (
        status,
        Json(ApiResponse {
            data: None,
            meta: ResponseMeta::new(status, Some(message)),
        }),
    )
}

pub fn from_app_error<T>(err: &AppError) -> Reply<T> {
    error(err.status_code(), err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_has_no_data() {
        let (status, Json(body)) = error::<String>(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.data.is_none());
        assert_eq!(body.meta.status, "error");
        assert_eq!(body.meta.status_code, 502);
        assert_eq!(body.meta.message.as_deref(), Some("upstream down"));
    }

    #[test]
    fn app_errors_map_to_their_status() {
        let (status, Json(body)) = from_app_error::<String>(&AppError::InvalidUrl("nope".to_string()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.meta.message.as_deref(), Some("Invalid URL: nope"));
    }

    #[test]
    fn success_envelope_wraps_data() {
        let (status, Json(body)) = success("summary");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.data, Some("summary"));
        assert_eq!(body.meta.status, "success");
        assert!(body.meta.message.is_none());
    }
}
