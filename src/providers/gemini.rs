//! Gemini provider implementation
//!
//! Uses the `generateContent` endpoint with a declarative response schema
//! attached to `generationConfig`, so the array-of-objects shape is
//! enforced server-side (`supports_structured_output() == true`).

use crate::config::{GeminiConfig, GenerationParams};
use crate::error::{GenError, GenResult};
use crate::logging::{log_debug, log_error};
use crate::provider::{GenerationPrompt, ModelResponse, TestCaseProvider, TokenUsage};
use serde::{Deserialize, Serialize};

/// Gemini generateContent request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiGenerationConfig>,
}

/// Content block: an ordered list of parts with an optional role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    pub parts: Vec<GeminiPart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Text part of a content block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    pub text: String,
}

/// Generation parameters including the structured-output schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(rename = "topP", skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

/// Gemini generateContent response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    #[serde(rename = "usageMetadata", default)]
    pub usage_metadata: Option<GeminiUsageMetadata>,
    #[serde(rename = "modelVersion", default)]
    pub model_version: Option<String>,
}

/// Candidate in Gemini response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiCandidate {
    pub content: GeminiCandidateContent,
}

/// Content of a response candidate
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiCandidateContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// Token usage reported by Gemini
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiUsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    pub candidates_token_count: u32,
    #[serde(rename = "totalTokenCount", default)]
    pub total_token_count: u32,
}

/// Gemini provider implementation
#[derive(Debug)]
pub struct GeminiProvider {
    client: reqwest::Client,
    config: GeminiConfig,
    params: GenerationParams,
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Errors
    ///
    /// Returns [`GenError::ConfigurationError`] if the API key is missing.
    pub fn new(config: GeminiConfig, params: GenerationParams) -> GenResult<Self> {
        log_debug!(
            provider = "gemini",
            has_api_key = config.api_key.is_some(),
            base_url = %config.base_url,
            default_model = %config.default_model,
            default_temperature = params.temperature,
            "Creating Gemini provider"
        );

        if config.api_key.is_none() {
            return Err(GenError::configuration_error("Gemini API key is required"));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            config,
            params,
        })
    }

    /// Build the generateContent request from prompt material
    fn create_request(&self, prompt: &GenerationPrompt) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.user.clone(),
                }],
                role: Some("user".to_string()),
            }],
            system_instruction: Some(GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.system.clone(),
                }],
                role: None,
            }),
            generation_config: Some(GeminiGenerationConfig {
                temperature: Some(self.params.temperature),
                top_p: Some(self.params.top_p),
                max_output_tokens: Some(self.params.max_tokens),
                response_mime_type: Some("application/json".to_string()),
                response_schema: prompt.response_schema.clone(),
            }),
        }
    }

    /// Execute a single HTTP request (one best-effort round trip, no retries)
    async fn send_request(&self, request: &GeminiRequest) -> GenResult<GeminiResponse> {
        // Key travels as a query parameter, per the generateContent API
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.default_model,
            self.config.api_key.as_deref().unwrap_or_default()
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                log_error!(
                    provider = "gemini",
                    error = %e,
                    "HTTP request failed"
                );
                GenError::request_failed(format!("Request failed: {e}"), Some(Box::new(e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            log_error!(
                provider = "gemini",
                status = %status,
                error_text = %error_text,
                "API error response"
            );

            return Err(match status.as_u16() {
                // 400 is INVALID_ARGUMENT (malformed body/schema), not auth
                401 | 403 => {
                    GenError::authentication_failed("Invalid API key or authentication failed")
                }
                429 => {
                    let retry_after_seconds = headers
                        .get("retry-after")
                        .and_then(|h| h.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    GenError::rate_limit_exceeded(retry_after_seconds)
                }
                _ => GenError::request_failed(format!("API error {status}: {error_text}"), None),
            });
        }

        let raw_body = response.text().await.map_err(|e| {
            GenError::response_parsing_error(format!("Failed to read response: {e}"))
        })?;

        serde_json::from_str(&raw_body).map_err(|e| {
            log_error!(
                provider = "gemini",
                error = %e,
                raw_body = %raw_body,
                "Failed to parse response"
            );
            GenError::response_parsing_error(format!("Invalid response: {e}"))
        })
    }

    /// Extract the generated text from the first candidate
    fn parse_response(&self, response: GeminiResponse) -> GenResult<ModelResponse> {
        let content = response
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.clone())
            .ok_or_else(|| {
                GenError::response_parsing_error("No candidates in Gemini response")
            })?;

        let usage = response.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        Ok(ModelResponse {
            content,
            usage,
            model: response
                .model_version
                .or_else(|| Some(self.config.default_model.clone())),
        })
    }
}

#[async_trait::async_trait]
impl TestCaseProvider for GeminiProvider {
    async fn generate(&self, prompt: GenerationPrompt) -> GenResult<ModelResponse> {
        let request = self.create_request(&prompt);

        log_debug!(
            provider = "gemini",
            model = %self.config.default_model,
            has_schema = request
                .generation_config
                .as_ref()
                .is_some_and(|c| c.response_schema.is_some()),
            "Executing generation request"
        );

        let api_response = self.send_request(&request).await?;
        self.parse_response(api_response)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn supports_structured_output(&self) -> bool {
        true
    }
}
