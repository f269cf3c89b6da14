//! Integration Tests for OpenAI Provider HTTP Handling
//!
//! UNIT UNDER TEST: OpenAIProvider HTTP request handling
//!
//! BUSINESS RESPONSIBILITY:
//!   - Execute chat-completions requests with bearer authentication
//!   - Send the json_object response-format flag (advisory path)
//!   - Handle API errors (401, 429, 500) and network failures
//!   - Parse successful responses into the unified ModelResponse
//!
//! TEST COVERAGE:
//!   - Provider initialization with valid/invalid config
//!   - Successful API requests and response parsing
//!   - Authentication errors (401), rate limiting (429), server errors (500)
//!   - Invalid JSON bodies and network failures
//!   - Request body contents (model, messages, response_format)

mod common;

use common::{openai_completion_body, openai_test_config, test_params};
use testgen_llm::provider::GenerationPrompt;
use testgen_llm::{GenError, OpenAIProvider, TestCaseProvider};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_prompt() -> GenerationPrompt {
    GenerationPrompt::new(
        "You are a QA engineer.",
        "Generate test cases for: password reset",
    )
}

// ============================================================================
// Provider Initialization Tests
// ============================================================================

#[test]
fn test_provider_new_with_valid_config() {
    let config = openai_test_config("https://api.openai.com".to_string());

    let result = OpenAIProvider::new(config, test_params());

    assert!(result.is_ok(), "Should initialize with valid config");
}

#[test]
fn test_provider_new_without_api_key() {
    let mut config = openai_test_config("https://api.openai.com".to_string());
    config.api_key = None;

    let result = OpenAIProvider::new(config, test_params());

    assert!(matches!(result, Err(GenError::ConfigurationError { .. })));
}

#[test]
fn test_provider_reports_advisory_capability() {
    let config = openai_test_config("https://api.openai.com".to_string());
    let provider = OpenAIProvider::new(config, test_params()).unwrap();

    assert_eq!(provider.provider_name(), "openai");
    assert!(
        !provider.supports_structured_output(),
        "json_object mode is advisory, not schema-enforced"
    );
}

// ============================================================================
// HTTP Request Tests
// ============================================================================

#[tokio::test]
async fn test_generate_success() {
    let mock_server = MockServer::start().await;
    let config = openai_test_config(mock_server.uri());

    let body = openai_completion_body(r#"{"test_cases": []}"#);

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = OpenAIProvider::new(config, test_params()).unwrap();

    let response = provider.generate(test_prompt()).await.expect("should succeed");

    assert_eq!(response.content, r#"{"test_cases": []}"#);
    let usage = response.usage.expect("usage should be parsed");
    assert_eq!(usage.total_tokens, 200);
    assert_eq!(response.model.as_deref(), Some("gpt-3.5-turbo-1106"));
}

#[tokio::test]
async fn test_request_carries_messages_and_json_mode() {
    let mock_server = MockServer::start().await;
    let config = openai_test_config(mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-3.5-turbo-1106",
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": "You are a QA engineer." },
                { "role": "user", "content": "Generate test cases for: password reset" }
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(openai_completion_body("{\"a\":[]}")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = OpenAIProvider::new(config, test_params()).unwrap();

    provider.generate(test_prompt()).await.expect("should succeed");
}

#[tokio::test]
async fn test_handle_401_authentication_error() {
    let mock_server = MockServer::start().await;
    let config = openai_test_config(mock_server.uri());

    let error_body = serde_json::json!({
        "error": {
            "message": "Invalid API key",
            "type": "invalid_request_error"
        }
    });

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(&error_body))
        .mount(&mock_server)
        .await;

    let provider = OpenAIProvider::new(config, test_params()).unwrap();

    let result = provider.generate(test_prompt()).await;

    assert!(matches!(result, Err(GenError::AuthenticationFailed { .. })));
}

#[tokio::test]
async fn test_handle_429_rate_limit_error_with_retry_after() {
    let mock_server = MockServer::start().await;
    let config = openai_test_config(mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "30")
                .set_body_json(serde_json::json!({
                    "error": { "message": "Rate limit exceeded", "type": "rate_limit_error" }
                })),
        )
        .mount(&mock_server)
        .await;

    let provider = OpenAIProvider::new(config, test_params()).unwrap();

    let result = provider.generate(test_prompt()).await;

    assert!(matches!(
        result,
        Err(GenError::RateLimitExceeded { retry_after_seconds: 30 })
    ));
}

#[tokio::test]
async fn test_handle_500_server_error() {
    let mock_server = MockServer::start().await;
    let config = openai_test_config(mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal server error"))
        .mount(&mock_server)
        .await;

    let provider = OpenAIProvider::new(config, test_params()).unwrap();

    let result = provider.generate(test_prompt()).await;

    assert!(matches!(result, Err(GenError::RequestFailed { .. })));
}

#[tokio::test]
async fn test_single_round_trip_no_retries() {
    // Each call is one best-effort round trip; a failure must not
    // produce a second request
    let mock_server = MockServer::start().await;
    let config = openai_test_config(mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = OpenAIProvider::new(config, test_params()).unwrap();

    let result = provider.generate(test_prompt()).await;

    assert!(result.is_err());
    // expect(1) on the mock verifies exactly one request was made
}

#[tokio::test]
async fn test_handle_invalid_json_response() {
    let mock_server = MockServer::start().await;
    let config = openai_test_config(mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("invalid json"))
        .mount(&mock_server)
        .await;

    let provider = OpenAIProvider::new(config, test_params()).unwrap();

    let result = provider.generate(test_prompt()).await;

    assert!(matches!(result, Err(GenError::ResponseParsingError { .. })));
}

#[tokio::test]
async fn test_handle_empty_choices() {
    let mock_server = MockServer::start().await;
    let config = openai_test_config(mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
        )
        .mount(&mock_server)
        .await;

    let provider = OpenAIProvider::new(config, test_params()).unwrap();

    let result = provider.generate(test_prompt()).await;

    assert!(matches!(result, Err(GenError::ResponseParsingError { .. })));
}

#[tokio::test]
async fn test_handle_network_failure() {
    let config = openai_test_config("http://localhost:1".to_string());

    let provider = OpenAIProvider::new(config, test_params()).unwrap();

    let result = provider.generate(test_prompt()).await;

    assert!(matches!(result, Err(GenError::RequestFailed { .. })));
}
