//! Quill Model Provider Layer
//!
//! Pluggable implementations of the `ModelProvider` trait from
//! `quill-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic mock for testing
//! - `AnthropicProvider`: Anthropic Messages API
//! - `OpenAiProvider`: OpenAI Chat Completions API
//! - `AnyProvider`: name-selected dispatch over the hosted providers
//!
//! A provider failure is surfaced to the caller exactly once, with the
//! provider's message attached; there is no retry or backoff in this
//! layer.
//!
//! # Examples
//!
//! ```
//! use quill_llm::MockProvider;
//! use quill_domain::traits::{GenerationRequest, ModelProvider};
//!
//! # async fn example() {
//! let provider = MockProvider::new("Hello from the model!");
//! let request = GenerationRequest {
//!     prompt: "test prompt".to_string(),
//!     model: "test-model".to_string(),
//!     max_tokens: None,
//! };
//! let result = provider.generate(&request).await.unwrap();
//! assert_eq!(result, "Hello from the model!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod anthropic;
pub mod openai;

use quill_domain::traits::{GenerationRequest, ModelProvider};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use anthropic::AnthropicProvider;
pub use openai::OpenAiProvider;

/// Token budget applied when a request does not specify one.
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// Default timeout for hosted model requests (long-form generation is slow)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Errors that can occur during model-provider operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The provider answered, but not in the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available at the provider
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Rate limit exceeded; surfaced to the caller, never retried here
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Provider name not recognized
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Generic error
    #[error("Model error: {0}")]
    Other(String),
}

/// Hosted providers selectable by configured name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Anthropic Messages API
    Anthropic,
    /// OpenAI Chat Completions API
    OpenAi,
}

impl FromStr for ProviderKind {
    type Err = LlmError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "anthropic" => Ok(ProviderKind::Anthropic),
            "openai" => Ok(ProviderKind::OpenAi),
            other => Err(LlmError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// A provider chosen at runtime from configuration.
pub enum AnyProvider {
    /// Anthropic Messages API
    Anthropic(AnthropicProvider),
    /// OpenAI Chat Completions API
    OpenAi(OpenAiProvider),
}

impl AnyProvider {
    /// Construct the provider for `kind` with the given API key.
    pub fn new(kind: ProviderKind, api_key: impl Into<String>) -> Self {
        match kind {
            ProviderKind::Anthropic => AnyProvider::Anthropic(AnthropicProvider::new(api_key)),
            ProviderKind::OpenAi => AnyProvider::OpenAi(OpenAiProvider::new(api_key)),
        }
    }
}

impl ModelProvider for AnyProvider {
    type Error = LlmError;

    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        match self {
            AnyProvider::Anthropic(provider) => provider.generate(request).await,
            AnyProvider::OpenAi(provider) => provider.generate(request).await,
        }
    }
}

/// Mock provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
///
/// # Examples
///
/// ```
/// use quill_llm::MockProvider;
/// use quill_domain::traits::{GenerationRequest, ModelProvider};
///
/// # async fn example() {
/// let mut provider = MockProvider::new("default");
/// provider.add_response("prompt1", "response1");
///
/// let request = GenerationRequest {
///     prompt: "prompt1".to_string(),
///     model: "m".to_string(),
///     max_tokens: None,
/// };
/// assert_eq!(provider.generate(&request).await.unwrap(), "response1");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), response.into());
    }

    /// Configure an error result for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), "ERROR".to_string());
    }

    /// Number of generate calls so far
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// The most recent prompt passed to generate
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl ModelProvider for MockProvider {
    type Error = LlmError;

    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(request.prompt.clone());

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(&request.prompt) {
            if response == "ERROR" {
                return Err(LlmError::Other("Mock error".to_string()));
            }
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: &str) -> GenerationRequest {
        GenerationRequest {
            prompt: prompt.to_string(),
            model: "test-model".to_string(),
            max_tokens: None,
        }
    }

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate(&request("any prompt")).await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate(&request("hello")).await.unwrap(), "world");
        assert_eq!(provider.generate(&request("foo")).await.unwrap(), "bar");
        assert_eq!(
            provider.generate(&request("unknown")).await.unwrap(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_mock_provider_records_prompts() {
        let provider = MockProvider::new("x");
        assert_eq!(provider.call_count(), 0);
        assert_eq!(provider.last_prompt(), None);

        provider.generate(&request("first")).await.unwrap();
        provider.generate(&request("second")).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.last_prompt().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider.generate(&request("bad prompt")).await;
        assert!(matches!(result.unwrap_err(), LlmError::Other(_)));
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate(&request("test")).await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }

    #[test]
    fn test_provider_kind_parsing() {
        assert_eq!("anthropic".parse::<ProviderKind>().unwrap(), ProviderKind::Anthropic);
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert!(matches!(
            "cohere".parse::<ProviderKind>(),
            Err(LlmError::UnsupportedProvider(_))
        ));
    }
}
