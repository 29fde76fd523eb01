//! Gemini chat-completion client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default model identifier.
const DEFAULT_MODEL: &str = "gemini-pro";

/// Base URL of the generative language API.
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Chat-completion errors.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("api key is required")]
    MissingApiKey,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat api returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("chat response missing generated text")]
    MalformedResponse,
}

/// Trait for generating text from a prompt.
///
/// Implementations are opaque collaborators: the pipeline neither shapes nor
/// validates what comes back.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Generate free-form text for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, ChatError>;
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Debug)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Create a client. An empty API key is rejected immediately.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ChatError> {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Create a client for a specific model.
    pub fn with_model(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ChatError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ChatError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: model.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{BASE_URL}/models/{}:generateContent?key={}",
            self.model, self.api_key
        )
    }
}

#[async_trait]
impl ChatService for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ChatError> {
        debug!("requesting completion from {}", self.model);

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self.client.post(self.endpoint()).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Api { status, body });
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(ChatError::MalformedResponse)
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}
