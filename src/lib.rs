//! # testgen-llm
//!
//! Requirement-to-test-case generator backed by OpenAI and Gemini.
//!
//! ## Key Features
//!
//! - **Structured output**: JSON test-case lists via server-enforced
//!   schema (Gemini) or prompt instruction plus JSON mode (OpenAI)
//! - **Uniform validation**: both provider paths go through the same
//!   post-call shape check, so they produce identical guarantees
//! - **Injected providers**: the generator takes its backend as a
//!   constructor argument and is testable without network or env vars
//!
//! ## Example
//!
//! ```rust,no_run
//! use testgen_llm::{GeneratorClient, TestCaseGenerator};
//!
//! # async fn example() -> testgen_llm::GenResult<()> {
//! let client = GeneratorClient::from_env()?;
//! let generator = TestCaseGenerator::new(client);
//!
//! let cases = generator
//!     .generate_test_cases("Users must be able to reset their password via email.")
//!     .await?;
//!
//! println!("Total Test Cases Generated: {}", cases.len());
//! # Ok(())
//! # }
//! ```

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod client;
pub mod config;
pub mod error;
pub mod generator;
pub mod prompt;
pub mod provider;
pub mod providers;
pub(crate) mod response_parser;
pub mod testcase;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use client::GeneratorClient;
pub use config::{GeminiConfig, GenerationParams, GeneratorConfig, OpenAIConfig, ProviderConfig};
pub use error::{ErrorCategory, GenError, GenResult};
pub use generator::TestCaseGenerator;
pub use provider::{GenerationPrompt, ModelResponse, TestCaseProvider, TokenUsage};
pub use providers::{GeminiProvider, OpenAIProvider};
pub use testcase::{to_pretty_json, TestCase, TestCaseKind};
