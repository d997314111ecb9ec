use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to scrape page: {0}")]
    FetchError(String),

    #[error("Summarization failed: {0}")]
    LlmError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            AppError::FetchError(_) => StatusCode::BAD_GATEWAY,
            AppError::LlmError(_) => StatusCode::BAD_GATEWAY,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(AppError::InvalidUrl("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::FetchError("x".into()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::LlmError("x".into()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            AppError::ConfigError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn missing_env_var_is_config_error() {
        let err: AppError = std::env::VarError::NotPresent.into();
        assert!(matches!(err, AppError::ConfigError(_)));
    }
}
