//! Provider trait and request/response types for the LLM seam.
//!
//! Defines the `TestCaseProvider` trait that both backends implement. The
//! generator only sees this trait, so the provider handle is an injected
//! dependency rather than a process-global client.

use crate::error::GenResult;
use serde::{Deserialize, Serialize};

/// Prompt material for one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationPrompt {
    /// Fixed system instruction.
    pub system: String,
    /// User message embedding the requirement.
    pub user: String,
    /// Declarative output schema, present only when the provider
    /// reports `supports_structured_output()`.
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationPrompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            response_schema: None,
        }
    }

    /// Attach a declarative output schema.
    pub fn with_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// Token usage information reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt.
    pub prompt_tokens: u32,
    /// Number of tokens in the completion.
    pub completion_tokens: u32,
    /// Total tokens used (prompt + completion).
    pub total_tokens: u32,
}

/// Raw model output for one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelResponse {
    /// Generated text (expected to contain the JSON payload).
    pub content: String,
    /// Token usage, when the provider reports it.
    pub usage: Option<TokenUsage>,
    /// Model that generated the response.
    pub model: Option<String>,
}

/// Trait for test-case generation backends.
///
/// One synchronous best-effort round trip per call: no retries, no
/// streaming, no cancellation. Implementations map HTTP and decoding
/// failures into [`crate::GenError`] instead of panicking.
#[async_trait::async_trait]
pub trait TestCaseProvider: Send + Sync {
    /// Execute one generation round trip and return the raw model output.
    async fn generate(&self, prompt: GenerationPrompt) -> GenResult<ModelResponse>;

    /// Provider name for logging and debugging.
    fn provider_name(&self) -> &'static str;

    /// Whether the provider enforces the response schema server-side.
    ///
    /// When false, the output shape is conveyed via prompt instruction
    /// only and schema violations surface at post-call validation.
    fn supports_structured_output(&self) -> bool;
}
