// * Gemini REST client
// * Implements both assistant collaborators over the generateContent endpoint.
// * The API key is supplied by the caller; nothing here reads the environment.

use crate::assistant::prompts::{summary_prompt, system_instruction};
use crate::assistant::{
    AssistantError, ChatAssistant, ChatTurn, ReplyFuture, Role, SummaryProvider, CHAT_FAILURE,
    CHAT_MISSING_KEY, CHAT_NOT_READY, SUMMARY_FAILURE, SUMMARY_MISSING_KEY,
};
use crate::config::constants::{
    ASSISTANT_TIMEOUT_MS, GEMINI_BASE_URL, GEMINI_CHAT_MODEL, GEMINI_SUMMARY_MODEL,
};
use crate::ingest::record::InnovationRecord;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

/// Client configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub chat_model: String,
    pub summary_model: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: GEMINI_BASE_URL.to_string(),
            chat_model: GEMINI_CHAT_MODEL.to_string(),
            summary_model: GEMINI_SUMMARY_MODEL.to_string(),
            timeout: Duration::from_millis(ASSISTANT_TIMEOUT_MS),
        }
    }
}

impl GeminiConfig {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    pub fn summary_model(mut self, model: impl Into<String>) -> Self {
        self.summary_model = model.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

// * generateContent wire types
#[derive(Debug, Serialize)]
struct GenerateRequest {
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<Role>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(|r| r.as_str().to_string()),
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// HTTP client for the Generative Language API
pub struct GeminiClient {
    inner: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AssistantError> {
        let inner = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { inner, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    async fn generate(&self, model: &str, request: &GenerateRequest) -> Result<String, AssistantError> {
        let key = self.config.key().ok_or(AssistantError::MissingApiKey)?;

        debug!(model = model, turns = request.contents.len(), "Sending generateContent request");
        let resp = self
            .inner
            .post(self.endpoint(model))
            .header("x-goog-api-key", key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AssistantError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = resp.json().await?;
        parsed.into_text().ok_or(AssistantError::EmptyResponse)
    }

    /// Chat turn grounded on the dataset; errors are returned, not masked
    pub async fn chat(
        &self,
        history: &[ChatTurn],
        message: &str,
        context: &str,
    ) -> Result<String, AssistantError> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content::text(Some(turn.role), turn.text.clone()))
            .collect();
        contents.push(Content::text(Some(Role::User), message));

        let request = GenerateRequest {
            system_instruction: Some(Content::text(None, system_instruction(context))),
            contents,
        };
        self.generate(&self.config.chat_model, &request).await
    }

    /// Summary of a filtered view; errors are returned, not masked
    pub async fn summary(&self, records: &[&InnovationRecord]) -> Result<String, AssistantError> {
        let request = GenerateRequest {
            system_instruction: None,
            contents: vec![Content::text(Some(Role::User), summary_prompt(records))],
        };
        self.generate(&self.config.summary_model, &request).await
    }
}

impl ChatAssistant for GeminiClient {
    fn reply<'a>(
        &'a self,
        history: &'a [ChatTurn],
        message: &'a str,
        context: &'a str,
    ) -> ReplyFuture<'a> {
        Box::pin(async move {
            if self.config.key().is_none() {
                return CHAT_MISSING_KEY.to_string();
            }
            if context.is_empty() {
                return CHAT_NOT_READY.to_string();
            }

            match self.chat(history, message, context).await {
                Ok(text) => text,
                Err(e) => {
                    error!(error = %e, "Chat request failed");
                    CHAT_FAILURE.to_string()
                }
            }
        })
    }
}

impl SummaryProvider for GeminiClient {
    fn summarize<'a>(&'a self, records: &'a [&'a InnovationRecord]) -> ReplyFuture<'a> {
        Box::pin(async move {
            if self.config.key().is_none() {
                return SUMMARY_MISSING_KEY.to_string();
            }

            match self.summary(records).await {
                Ok(text) => text,
                Err(e) => {
                    error!(error = %e, "Summary request failed");
                    SUMMARY_FAILURE.to_string()
                }
            }
        })
    }
}
