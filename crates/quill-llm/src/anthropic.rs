//! Anthropic Messages API provider

use crate::{LlmError, DEFAULT_MAX_TOKENS, DEFAULT_TIMEOUT_SECS};
use quill_domain::traits::{GenerationRequest, ModelProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Anthropic API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com";

const API_VERSION: &str = "2023-06-01";

/// Anthropic Messages API provider
pub struct AnthropicProvider {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

/// Request body for the Messages API
#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

/// Response from the Messages API
#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

impl AnthropicProvider {
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

    /// Generate text via the Messages API.
    ///
    /// # Errors
    ///
    /// Returns an error if the network call fails, the model is unknown,
    /// the rate limit is hit, or the response has no text content. The
    /// failure is surfaced once; nothing here retries.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let url = format!("{}/v1/messages", self.endpoint);

        let body = MessagesRequest {
            model: request.model.clone(),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            messages: vec![Message {
                role: "user",
                content: request.prompt.clone(),
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            let parsed: MessagesResponse = response
                .json()
                .await
                .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
            parsed
                .content
                .into_iter()
                .next()
                .map(|block| block.text)
                .ok_or_else(|| LlmError::InvalidResponse("Empty content".to_string()))
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

impl ModelProvider for AnthropicProvider {
    type Error = LlmError;

    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        AnthropicProvider::generate(self, request).await
    }
}
