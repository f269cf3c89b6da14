//! OpenAI provider implementation
//!
//! Uses the chat-completions endpoint with the generic `json_object`
//! response format. The array-of-objects shape is conveyed in the prompt
//! only, so this provider reports `supports_structured_output() == false`
//! and shape violations surface at post-call validation.

use crate::config::{GenerationParams, OpenAIConfig};
use crate::error::{GenError, GenResult};
use crate::logging::{log_debug, log_error};
use crate::provider::{GenerationPrompt, ModelResponse, TestCaseProvider, TokenUsage};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

/// OpenAI chat message structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIMessage {
    pub role: String,
    pub content: String,
}

/// Response format flag for JSON-mode output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAIResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String, // "json_object"
}

/// OpenAI chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<OpenAIResponseFormat>,
}

/// OpenAI chat completion response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAIResponse {
    pub choices: Vec<OpenAIChoice>,
    #[serde(default)]
    pub usage: Option<OpenAIUsage>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Choice in OpenAI response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAIChoice {
    pub message: OpenAIResponseMessage,
    #[allow(dead_code)]
    pub finish_reason: Option<String>,
}

/// Message in OpenAI response choice
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAIResponseMessage {
    #[allow(dead_code)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

/// Usage information in OpenAI response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAIUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// OpenAI provider implementation
#[derive(Debug)]
pub struct OpenAIProvider {
    client: reqwest::Client,
    config: OpenAIConfig,
    params: GenerationParams,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider instance
    ///
    /// # Errors
    ///
    /// Returns [`GenError::ConfigurationError`] if the API key is missing.
    pub fn new(config: OpenAIConfig, params: GenerationParams) -> GenResult<Self> {
        log_debug!(
            provider = "openai",
            has_api_key = config.api_key.is_some(),
            base_url = %config.base_url,
            default_model = %config.default_model,
            default_temperature = params.temperature,
            "Creating OpenAI provider"
        );

        if config.api_key.is_none() {
            return Err(GenError::configuration_error("OpenAI API key is required"));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            config,
            params,
        })
    }

    /// Build bearer-auth headers for the chat-completions endpoint
    fn build_auth_headers(api_key: &str) -> GenResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                GenError::configuration_error(format!("Invalid API key format: {e}"))
            })?,
        );

        Ok(headers)
    }

    /// Build the chat request from prompt material
    fn create_request(&self, prompt: &GenerationPrompt) -> OpenAIRequest {
        OpenAIRequest {
            model: self.config.default_model.clone(),
            messages: vec![
                OpenAIMessage {
                    role: "system".to_string(),
                    content: prompt.system.clone(),
                },
                OpenAIMessage {
                    role: "user".to_string(),
                    content: prompt.user.clone(),
                },
            ],
            temperature: Some(self.params.temperature),
            max_tokens: Some(self.params.max_tokens),
            top_p: Some(self.params.top_p),
            response_format: Some(OpenAIResponseFormat {
                format_type: "json_object".to_string(),
            }),
        }
    }

    /// Execute a single HTTP request (one best-effort round trip, no retries)
    async fn send_request(&self, request: &OpenAIRequest) -> GenResult<OpenAIResponse> {
        let url = format!("{}/v1/chat/completions", self.config.base_url);
        let headers =
            Self::build_auth_headers(self.config.api_key.as_deref().unwrap_or_default())?;

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                log_error!(
                    url = %url,
                    error = %e,
                    "HTTP request failed"
                );
                GenError::request_failed(format!("Request failed: {e}"), Some(Box::new(e)))
            })?;

        if !response.status().is_success() {
            return Err(handle_error_response(response).await);
        }

        parse_success_response(response).await
    }

    /// Extract the generated text from the first choice
    fn parse_response(&self, response: OpenAIResponse) -> GenResult<ModelResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenError::response_parsing_error("No choices in OpenAI response"))?;

        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(ModelResponse {
            content: choice.message.content,
            usage,
            model: response
                .model
                .or_else(|| Some(self.config.default_model.clone())),
        })
    }
}

#[async_trait::async_trait]
impl TestCaseProvider for OpenAIProvider {
    async fn generate(&self, prompt: GenerationPrompt) -> GenResult<ModelResponse> {
        let request = self.create_request(&prompt);

        log_debug!(
            provider = "openai",
            model = %request.model,
            message_count = request.messages.len(),
            "Executing generation request"
        );

        let api_response = self.send_request(&request).await?;
        self.parse_response(api_response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn supports_structured_output(&self) -> bool {
        // json_object mode is advisory: the array-of-objects shape lives
        // in the prompt, not in a server-enforced schema
        false
    }
}

/// Handle non-success HTTP responses
async fn handle_error_response(response: reqwest::Response) -> GenError {
    let status = response.status();
    let headers = response.headers().clone();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    log_error!(
        status = %status,
        error_text = %error_text,
        "API error response"
    );

    match status.as_u16() {
        401 => GenError::authentication_failed("Invalid API key or authentication failed"),
        429 => {
            let retry_after_seconds = headers
                .get("retry-after")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);

            GenError::rate_limit_exceeded(retry_after_seconds)
        }
        _ => GenError::request_failed(format!("API error {status}: {error_text}"), None),
    }
}

/// Parse successful HTTP response into OpenAIResponse
async fn parse_success_response(response: reqwest::Response) -> GenResult<OpenAIResponse> {
    let raw_body = response.text().await.map_err(|e| {
        log_error!(
            error = %e,
            "Failed to read response body"
        );
        GenError::response_parsing_error(format!("Failed to read response: {e}"))
    })?;

    serde_json::from_str(&raw_body).map_err(|e| {
        log_error!(
            error = %e,
            raw_body = %raw_body,
            "Failed to parse response"
        );
        GenError::response_parsing_error(format!("Invalid response: {e}"))
    })
}
