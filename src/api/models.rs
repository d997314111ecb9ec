use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Deserialize)]
pub struct SummarizeRequest {
    pub url: String,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

/// Urlencoded body of the HTML form.
#[derive(Deserialize)]
pub struct SummarizeForm {
    #[serde(default)]
    pub url: String,
}

#[derive(Serialize)]
pub struct SummarizeResponse {
    pub url: String,
    #[serde(rename = "summary_markdown")]
    pub summary: String,
    pub summarized_at: DateTime<Utc>,
}
