//! OpenAI Chat Completions API provider

use crate::{LlmError, DEFAULT_MAX_TOKENS, DEFAULT_TIMEOUT_SECS};
use quill_domain::traits::{GenerationRequest, ModelProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default OpenAI API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com";

const SYSTEM_PROMPT: &str = "You are a professional writing assistant.";
const TEMPERATURE: f32 = 0.7;

/// OpenAI Chat Completions API provider
pub struct OpenAiProvider {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

/// Request body for the Chat Completions API
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Response from the Chat Completions API
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl OpenAiProvider {
    /// Create a provider against the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key)
    }

    /// Create a provider against a specific endpoint (testing, proxies).
    pub fn with_endpoint(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Generate text via the Chat Completions API.
    ///
    /// # Errors
    ///
    /// Returns an error if the network call fails, the model is unknown,
    /// the rate limit is hit, or the response has no choices. The failure
    /// is surfaced once; nothing here retries.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.endpoint);

        let body = ChatRequest {
            model: request.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: request.prompt.clone(),
                },
            ],
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            let parsed: ChatResponse = response
                .json()
                .await
                .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
            parsed
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content)
                .ok_or_else(|| LlmError::InvalidResponse("No choices returned".to_string()))
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Err(LlmError::ModelNotAvailable(request.model.clone()))
        } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            Err(LlmError::RateLimited)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(LlmError::Communication(format!("HTTP {}: {}", status, error_text)))
        }
    }
}

impl ModelProvider for OpenAiProvider {
    type Error = LlmError;

    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        OpenAiProvider::generate(self, request).await
    }
}
