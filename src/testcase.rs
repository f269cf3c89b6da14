//! Test-case data model and response schemas.
//!
//! Defines the wire format shared with the LLM providers: a JSON array of
//! test-case objects with keys `id`, `type`, `description`, `steps` and
//! `expected_result`.

use serde::{Deserialize, Serialize};

/// Kind of a generated test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestCaseKind {
    /// Exercises the behavior described by the requirement.
    Functional,
    /// Exercises invalid or unexpected input and failure paths.
    Negative,
}

impl std::fmt::Display for TestCaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestCaseKind::Functional => write!(f, "Functional"),
            TestCaseKind::Negative => write!(f, "Negative"),
        }
    }
}

/// One generated test scenario.
///
/// All fields are required; a payload missing any of them fails
/// post-call validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// Unique short identifier, e.g. "TC-001".
    pub id: String,
    /// Functional or Negative.
    #[serde(rename = "type")]
    pub kind: TestCaseKind,
    /// Summary of the test purpose.
    pub description: String,
    /// Ordered execution steps.
    pub steps: Vec<String>,
    /// Required outcome of the test.
    pub expected_result: String,
}

/// JSON schema in Gemini's OpenAPI subset dialect (upper-case type tags).
///
/// Gemini's `generationConfig.responseSchema` field speaks this dialect
/// rather than standard JSON schema.
pub fn gemini_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": {
                    "type": "STRING",
                    "description": "Unique test case ID (e.g., TC-001)."
                },
                "type": {
                    "type": "STRING",
                    "description": "Type of test case (Functional or Negative)."
                },
                "description": {
                    "type": "STRING",
                    "description": "A summary of the test purpose."
                },
                "steps": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "A list of execution steps."
                },
                "expected_result": {
                    "type": "STRING",
                    "description": "The required outcome of the test."
                }
            },
            "required": ["id", "type", "description", "steps", "expected_result"]
        }
    })
}

/// Serialize test cases as pretty-printed JSON with 4-space indentation.
///
/// This is the console output format of the demo binary.
pub fn to_pretty_json(cases: &[TestCase]) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    cases.serialize(&mut ser)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8(buf).unwrap_or_default())
}
