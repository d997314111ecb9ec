use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use reqwest::Client;
use tracing::{debug, error, info};

use crate::config::SummarizerSettings;
use crate::error::{Result, AppError};
use crate::prompt::Prompt;

/// Turns a prompt into summary text with a single model call.
#[async_trait]
pub trait Summarize: Send + Sync {
    async fn summarize(&self, prompt: &Prompt) -> Result<String>;
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Chat-completions client for OpenAI and compatible providers.
pub struct OpenAiSummarizer {
    client: Client,
    settings: SummarizerSettings,
}

impl OpenAiSummarizer {
    pub fn new(settings: SummarizerSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url.trim_end_matches('/'))
    }

    fn chat_request<'a>(&'a self, prompt: &'a Prompt) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.settings.model,
            messages: vec![
                Message {
                    role: "system",
                    content: &prompt.system,
                },
                Message {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        }
    }

    async fn request_completion(&self, prompt: &Prompt) -> Result<String> {
        let body = self.chat_request(prompt);

        debug!(
            "Calling {} with model {} ({} chars of prompt)",
            self.endpoint(),
            self.settings.model,
            prompt.system.len() + prompt.user.len()
        );

        let res = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::LlmError(format!("Request to provider failed: {}", e)))?;

        let status = res.status();
        if !status.is_success() {
            let raw = res.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&raw)
                .map(|body| body.error.message)
                .unwrap_or(raw);
            return Err(AppError::LlmError(format!("OpenAI API error ({}): {}", status, message)));
        }

        let json: ChatResponse = res
            .json()
            .await
            .map_err(|e| AppError::LlmError(format!("Invalid response format from LLM: {}", e)))?;

        let reply = json
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::LlmError("Invalid response format from LLM: no content".to_string()))?;

        if reply.is_empty() {
            return Err(AppError::LlmError("LLM returned an empty summary".to_string()));
        }

        Ok(reply)
    }
}

#[async_trait]
impl Summarize for OpenAiSummarizer {
    async fn summarize(&self, prompt: &Prompt) -> Result<String> {
        match self.request_completion(prompt).await {
            Ok(reply) => {
                info!("Received {} chars of summary from {}", reply.len(), self.settings.model);
                Ok(reply)
            }
            Err(e) => {
                error!("Summarization failed: {}", e);
                Err(e)
            }
        }
    }
}
