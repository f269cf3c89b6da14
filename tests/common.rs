//! Shared helpers for provider integration tests.

#![allow(dead_code)]

use testgen_llm::{GeminiConfig, GenerationParams, OpenAIConfig};

pub fn openai_test_config(base_url: String) -> OpenAIConfig {
    OpenAIConfig {
        api_key: Some("test-key".to_string()),
        base_url,
        default_model: "gpt-3.5-turbo-1106".to_string(),
    }
}

pub fn gemini_test_config(base_url: String) -> GeminiConfig {
    GeminiConfig {
        api_key: Some("test-key".to_string()),
        base_url,
        default_model: "gemini-2.5-flash".to_string(),
    }
}

pub fn test_params() -> GenerationParams {
    GenerationParams {
        temperature: 0.7,
        max_tokens: 1024,
        top_p: 1.0,
    }
}

/// Password-reset requirement payload: one functional and one negative case.
pub fn password_reset_cases_json() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "TC-001",
            "type": "Functional",
            "description": "Verify reset email is sent",
            "steps": ["Enter email", "Submit"],
            "expected_result": "Email received"
        },
        {
            "id": "TC-002",
            "type": "Negative",
            "description": "Invalid email rejected",
            "steps": ["Enter malformed email", "Submit"],
            "expected_result": "Validation error shown"
        }
    ])
}

/// OpenAI chat-completions envelope around a content string.
pub fn openai_completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "model": "gpt-3.5-turbo-1106",
        "choices": [{
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": 120,
            "completion_tokens": 80,
            "total_tokens": 200
        }
    })
}

/// Gemini generateContent envelope around a content string.
pub fn gemini_completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": content }],
                "role": "model"
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 110,
            "candidatesTokenCount": 90,
            "totalTokenCount": 200
        },
        "modelVersion": "gemini-2.5-flash"
    })
}
