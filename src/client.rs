use crate::config::{GeminiConfig, GeneratorConfig, OpenAIConfig};
use crate::error::{GenError, GenResult};
use crate::logging::log_debug;
use crate::provider::{GenerationPrompt, ModelResponse, TestCaseProvider};
use crate::providers::{GeminiProvider, OpenAIProvider};
use async_trait::async_trait;

/// Internal provider enum for GeneratorClient
enum Provider {
    OpenAI(OpenAIProvider),
    Gemini(GeminiProvider),
}

/// Unified client over the test-case generation backends
///
/// Implements [`TestCaseProvider`], so it can be injected into
/// [`crate::TestCaseGenerator`] like any single-backend provider.
pub struct GeneratorClient {
    provider: Provider,
}

impl GeneratorClient {
    /// Create OpenAI provider from config
    fn create_openai_provider(config: &GeneratorConfig) -> GenResult<Provider> {
        let openai_config = config
            .provider
            .as_any()
            .downcast_ref::<OpenAIConfig>()
            .ok_or_else(|| GenError::configuration_error("Invalid OpenAI configuration"))?;

        let provider = OpenAIProvider::new(openai_config.clone(), config.params.clone())?;

        Ok(Provider::OpenAI(provider))
    }

    /// Create Gemini provider from config
    fn create_gemini_provider(config: &GeneratorConfig) -> GenResult<Provider> {
        let gemini_config = config
            .provider
            .as_any()
            .downcast_ref::<GeminiConfig>()
            .ok_or_else(|| GenError::configuration_error("Invalid Gemini configuration"))?;

        let provider = GeminiProvider::new(gemini_config.clone(), config.params.clone())?;

        Ok(Provider::Gemini(provider))
    }

    /// Factory method to create a GeneratorClient for a named provider
    ///
    /// # Errors
    ///
    /// Returns [`GenError::UnsupportedProvider`] if the provider name is not
    /// recognized. Supported providers are: "openai", "gemini".
    ///
    /// Returns [`GenError::ConfigurationError`] if the provider
    /// configuration type doesn't match the name or required fields are
    /// missing (e.g., API key).
    pub fn create(provider_name: &str, config: GeneratorConfig) -> GenResult<Self> {
        let provider = match provider_name {
            "openai" => Self::create_openai_provider(&config)?,
            "gemini" => Self::create_gemini_provider(&config)?,
            _ => return Err(GenError::unsupported_provider(provider_name)),
        };

        log_debug!(provider = provider_name, "GeneratorClient created");

        Ok(Self { provider })
    }

    /// Create a client using environment variables for configuration
    ///
    /// # Errors
    ///
    /// Returns [`GenError::ConfigurationError`] if the credential
    /// environment variable for the selected provider is absent.
    pub fn from_env() -> GenResult<Self> {
        let config = GeneratorConfig::from_env()?;
        Self::from_config(config)
    }

    /// Create a client from a GeneratorConfig
    ///
    /// # Errors
    ///
    /// Returns [`GenError::UnsupportedProvider`] or
    /// [`GenError::ConfigurationError`] as for [`create`](Self::create).
    pub fn from_config(config: GeneratorConfig) -> GenResult<Self> {
        let provider_name = config.provider.provider_name();

        log_debug!(
            target_provider = provider_name,
            model = config.provider.default_model(),
            "Creating GeneratorClient from config"
        );

        Self::create(provider_name, config)
    }
}

/// Delegate TestCaseProvider to the underlying backend
#[async_trait]
impl TestCaseProvider for GeneratorClient {
    async fn generate(&self, prompt: GenerationPrompt) -> GenResult<ModelResponse> {
        match &self.provider {
            Provider::OpenAI(p) => p.generate(prompt).await,
            Provider::Gemini(p) => p.generate(prompt).await,
        }
    }

    fn provider_name(&self) -> &'static str {
        match &self.provider {
            Provider::OpenAI(p) => p.provider_name(),
            Provider::Gemini(p) => p.provider_name(),
        }
    }

    fn supports_structured_output(&self) -> bool {
        match &self.provider {
            Provider::OpenAI(p) => p.supports_structured_output(),
            Provider::Gemini(p) => p.supports_structured_output(),
        }
    }
}
