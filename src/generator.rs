//! Requirement-to-test-cases generation core.
//!
//! Builds the prompts, issues one call through the injected provider, and
//! applies the same post-call validation to both provider paths so the
//! strict-schema and advisory backends produce identical guarantees.

use crate::error::{GenError, GenResult};
use crate::logging::{log_debug, log_info, log_warn};
use crate::prompt;
use crate::provider::{GenerationPrompt, TestCaseProvider};
use crate::response_parser::ResponseParser;
use crate::testcase::{self, TestCase, TestCaseKind};

/// Test-case generator with a constructor-injected provider.
///
/// The provider handle is passed in rather than constructed from global
/// state, so the generation logic is testable without environment
/// variables or a live endpoint.
pub struct TestCaseGenerator<P: TestCaseProvider> {
    provider: P,
}

impl<P: TestCaseProvider> TestCaseGenerator<P> {
    /// Create a generator around the given provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Access the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Generate structured test cases for a free-text requirement.
    ///
    /// One best-effort round trip: builds the fixed QA-engineer system
    /// instruction plus a user message embedding the requirement, requests
    /// JSON output (schema-enforced when the provider supports it,
    /// prompt-instructed otherwise), then parses and validates the result.
    ///
    /// # Errors
    ///
    /// - [`GenError::EmptyRequirement`] for empty/whitespace input
    /// - [`GenError::RequestFailed`], [`GenError::AuthenticationFailed`],
    ///   [`GenError::RateLimitExceeded`] from the provider round trip
    /// - [`GenError::ResponseParsingError`] when no JSON array can be
    ///   recovered from the model output
    /// - [`GenError::SchemaValidationFailed`] when the JSON parses but
    ///   doesn't match the test-case shape
    pub async fn generate_test_cases(&self, requirement: &str) -> GenResult<Vec<TestCase>> {
        if requirement.trim().is_empty() {
            return Err(GenError::empty_requirement());
        }

        let prompt = self.build_prompt(requirement);

        log_info!(
            provider = self.provider.provider_name(),
            structured_output = self.provider.supports_structured_output(),
            requirement_length = requirement.len(),
            "Sending test case generation request"
        );

        let response = self.provider.generate(prompt).await?;

        log_debug!(
            provider = self.provider.provider_name(),
            content_length = response.content.len(),
            model = response.model.as_deref().unwrap_or("unknown"),
            "Received model response"
        );

        let items = ResponseParser::parse_llm_output(&response.content)?;
        let cases = validate_test_cases(items)?;

        // The prompt asks for at least one negative case; acceptance is the
        // model's responsibility, so observe rather than enforce
        if !cases.iter().any(|c| c.kind == TestCaseKind::Negative) {
            log_warn!(
                provider = self.provider.provider_name(),
                case_count = cases.len(),
                "Model returned no negative test case"
            );
        }

        log_info!(
            provider = self.provider.provider_name(),
            case_count = cases.len(),
            "Test case generation completed"
        );

        Ok(cases)
    }

    /// Build prompt material according to the provider's capability.
    fn build_prompt(&self, requirement: &str) -> GenerationPrompt {
        if self.provider.supports_structured_output() {
            GenerationPrompt::new(
                prompt::SYSTEM_INSTRUCTION,
                prompt::user_prompt(requirement, false),
            )
            .with_schema(testcase::gemini_response_schema())
        } else {
            GenerationPrompt::new(
                prompt::SYSTEM_INSTRUCTION,
                prompt::user_prompt(requirement, true),
            )
        }
    }
}

/// Uniform post-call validation applied to both provider paths.
///
/// Deserializes each array element into a [`TestCase`]; a missing key or
/// wrong field type anywhere fails the whole call rather than silently
/// propagating malformed records.
fn validate_test_cases(items: Vec<serde_json::Value>) -> GenResult<Vec<TestCase>> {
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            serde_json::from_value::<TestCase>(item).map_err(|e| {
                GenError::schema_validation_failed(format!(
                    "Test case at index {idx} does not match the expected shape: {e}"
                ))
            })
        })
        .collect()
}
