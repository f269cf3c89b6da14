// Test modules for testgen-llm crate
//
// Test organization follows the template pattern where each source file
// has a corresponding test file that focuses on business logic verification.

// Test helper utilities
pub mod helpers;

pub mod testcase;

// NOTE: Provider HTTP tests live in the integration suite
// (tests/openai_provider_integration_tests.rs and
// tests/gemini_provider_integration_tests.rs) because they need a
// wiremock server.
