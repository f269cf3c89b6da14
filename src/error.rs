//! Error types for test-case generation.
//!
//! This module provides structured error handling for testgen-llm operations,
//! including categorization and user-facing messages.
//!
//! # Error Types
//!
//! The main error type is [`GenError`], which covers all failure modes:
//! - Configuration errors (missing API keys, invalid settings)
//! - Request failures (network issues, provider errors)
//! - Rate limiting
//! - Authentication failures
//! - Response parsing and schema validation failures
//!
//! # Result Type
//!
//! Use [`GenResult<T>`] as a convenient alias for `Result<T, GenError>`:
//!
//! ```rust
//! use testgen_llm::GenResult;
//!
//! fn my_function() -> GenResult<String> {
//!     Ok("Success".to_string())
//! }
//! ```

use crate::logging::{log_error, log_warn};
use thiserror::Error;

/// High-level categorization of errors for routing and handling decisions.
///
/// Use [`GenError::category()`] to get the category for any error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Client errors (invalid input, authentication, configuration).
    ///
    /// The caller made a mistake that they can fix (wrong API key,
    /// empty requirement, etc.).
    Client,

    /// External service failures (LLM providers, network issues).
    ///
    /// The provider or network had an issue. May be transient
    /// or indicate a provider outage.
    External,

    /// Temporary failures (rate limits).
    Transient,
}

/// Convenient result type for generation operations.
///
/// Alias for `Result<T, GenError>`.
pub type GenResult<T> = std::result::Result<T, GenError>;

/// Errors that can occur during test-case generation.
///
/// Each variant can be categorized via [`category()`](Self::category) and
/// converted to a user-friendly message via [`user_message()`](Self::user_message).
///
/// # Creating Errors
///
/// Use the constructor methods which automatically log the error:
///
/// ```rust
/// use testgen_llm::GenError;
///
/// let err = GenError::configuration_error("Missing API key");
/// let err = GenError::rate_limit_exceeded(60);
/// ```
#[derive(Error, Debug)]
pub enum GenError {
    /// The specified provider is not supported.
    ///
    /// Supported providers: "openai", "gemini"
    #[error("Provider not supported: {provider}")]
    UnsupportedProvider {
        /// The provider name that was requested.
        provider: String,
    },

    /// Provider configuration is invalid or incomplete.
    ///
    /// Common causes:
    /// - Missing API key
    /// - Invalid base URL format
    #[error("Provider configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The requirement text was empty or whitespace-only.
    #[error("Requirement text must not be empty")]
    EmptyRequirement,

    /// The HTTP request to the provider failed.
    #[error("Request failed: {message}")]
    RequestFailed {
        /// Description of the failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse the provider's response.
    ///
    /// The provider returned a response, but no JSON payload could be
    /// recovered from it.
    #[error("Response parsing failed: {message}")]
    ResponseParsingError {
        /// Details about the parsing failure.
        message: String,
    },

    /// Provider rate limit exceeded.
    #[error("Rate limit exceeded, retry after {retry_after_seconds}s")]
    RateLimitExceeded {
        /// Recommended wait time before retrying.
        retry_after_seconds: u64,
    },

    /// Authentication with the provider failed.
    ///
    /// Check your API key or credentials.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// Details about the authentication failure.
        message: String,
    },

    /// Response parsed as JSON but doesn't match the test-case shape.
    ///
    /// Missing keys, wrong field types, or a payload that isn't a list of
    /// test-case objects. Distinct from [`ResponseParsingError`](Self::ResponseParsingError)
    /// so callers can tell malformed JSON from well-formed JSON of the
    /// wrong shape.
    #[error("Test case schema validation failed: {message}")]
    SchemaValidationFailed {
        /// Details about the validation failure.
        message: String,
    },
}

impl GenError {
    /// Get the error category for routing and handling decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedProvider { .. } => ErrorCategory::Client,
            Self::ConfigurationError { .. } => ErrorCategory::Client,
            Self::EmptyRequirement => ErrorCategory::Client,
            Self::RequestFailed { .. } => ErrorCategory::External,
            Self::ResponseParsingError { .. } => ErrorCategory::External,
            Self::RateLimitExceeded { .. } => ErrorCategory::Transient,
            Self::AuthenticationFailed { .. } => ErrorCategory::Client,
            Self::SchemaValidationFailed { .. } => ErrorCategory::External,
        }
    }

    /// Convert to a user-friendly message suitable for display.
    ///
    /// Returns a message that's safe to show to end users - technical
    /// details and internal information are stripped or generalized.
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedProvider { .. } => {
                "The requested AI provider is not supported".to_string()
            }
            Self::ConfigurationError { .. } => {
                "AI service configuration issue. Please check your settings".to_string()
            }
            Self::EmptyRequirement => {
                "Please provide a non-empty requirement description".to_string()
            }
            Self::RequestFailed { .. } => {
                "Unable to communicate with AI service. Please try again".to_string()
            }
            Self::ResponseParsingError { .. } => {
                "Received an invalid response from AI service".to_string()
            }
            Self::RateLimitExceeded {
                retry_after_seconds,
            } => {
                format!("Service is busy. Please wait {retry_after_seconds} seconds and try again")
            }
            Self::AuthenticationFailed { .. } => {
                "Authentication failed. Please check your credentials".to_string()
            }
            Self::SchemaValidationFailed { .. } => {
                "Generated test cases did not match the expected format".to_string()
            }
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================
    //
    // These methods automatically log the error at the appropriate level.
    // Use them instead of constructing variants directly.

    /// Create an unsupported provider error (logs at ERROR level).
    pub fn unsupported_provider(provider: impl Into<String>) -> Self {
        let provider = provider.into();
        log_error!(
            provider = %provider,
            error_type = "unsupported_provider",
            "Unsupported LLM provider requested"
        );
        Self::UnsupportedProvider { provider }
    }

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "Provider configuration validation failed"
        );
        Self::ConfigurationError { message }
    }

    pub fn empty_requirement() -> Self {
        log_warn!(
            error_type = "empty_requirement",
            "Generation requested with empty requirement text"
        );
        Self::EmptyRequirement
    }

    pub fn request_failed(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_type = "request_failed",
            message = %message,
            has_source = source.is_some(),
            "LLM request execution failed"
        );
        Self::RequestFailed { message, source }
    }

    pub fn response_parsing_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "response_parsing_error",
            message = %message,
            "LLM response format invalid"
        );
        Self::ResponseParsingError { message }
    }

    pub fn rate_limit_exceeded(retry_after_seconds: u64) -> Self {
        log_warn!(
            error_type = "rate_limit_exceeded",
            retry_after_seconds = retry_after_seconds,
            "LLM provider rate limit exceeded"
        );
        Self::RateLimitExceeded {
            retry_after_seconds,
        }
    }

    pub fn authentication_failed(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "authentication_failed",
            message = %message,
            "LLM provider authentication failed"
        );
        Self::AuthenticationFailed { message }
    }

    pub fn schema_validation_failed(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "schema_validation_failed",
            message = %message,
            "Generated test cases failed schema validation"
        );
        Self::SchemaValidationFailed { message }
    }
}
