// Shared helpers for unit tests.

use crate::provider::ModelResponse;
use crate::testcase::{TestCase, TestCaseKind};

/// Password-reset payload: one functional and one negative case.
pub fn sample_test_case_json() -> &'static str {
    r#"[
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
    ]"#
}

pub fn sample_test_cases() -> Vec<TestCase> {
    vec![
        TestCase {
            id: "TC-001".to_string(),
            kind: TestCaseKind::Functional,
            description: "Verify reset email is sent".to_string(),
            steps: vec!["Enter email".to_string(), "Submit".to_string()],
            expected_result: "Email received".to_string(),
        },
        TestCase {
            id: "TC-002".to_string(),
            kind: TestCaseKind::Negative,
            description: "Invalid email rejected".to_string(),
            steps: vec!["Enter malformed email".to_string(), "Submit".to_string()],
            expected_result: "Validation error shown".to_string(),
        },
    ]
}

pub fn model_response(content: &str) -> ModelResponse {
    ModelResponse {
        content: content.to_string(),
        usage: None,
        model: Some("test-model".to_string()),
    }
}
