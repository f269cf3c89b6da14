use crate::error::{GenError, GenResult};
use crate::logging::log_debug;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt::Debug;

/// Trait for provider-specific configuration
pub trait ProviderConfig: Send + Sync + Debug + Any {
    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Validate provider configuration
    ///
    /// # Errors
    ///
    /// Returns [`GenError::ConfigurationError`] if required fields are
    /// missing (e.g., API key) or values are invalid.
    fn validate(&self) -> GenResult<()>;

    /// Get the base URL for API calls
    fn base_url(&self) -> &str;

    /// Get the API key if required
    fn api_key(&self) -> Option<&str>;

    /// Get the default model name
    fn default_model(&self) -> &str;

    /// Helper for downcasting to concrete config types
    fn as_any(&self) -> &dyn Any;
}

/// Generation parameters that apply across providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 4096,
            top_p: 0.9,
        }
    }
}

/// System-wide generator configuration
#[derive(Debug)]
pub struct GeneratorConfig {
    /// The selected provider configuration
    pub provider: Box<dyn ProviderConfig>,

    /// Default generation parameters that apply across providers
    pub params: GenerationParams,
}

impl GeneratorConfig {
    /// Clone provider config by downcasting to concrete type
    fn clone_provider(&self) -> Box<dyn ProviderConfig> {
        let any_ref = self.provider.as_any();

        if let Some(config) = any_ref.downcast_ref::<OpenAIConfig>() {
            return Box::new(config.clone());
        }
        if let Some(config) = any_ref.downcast_ref::<GeminiConfig>() {
            return Box::new(config.clone());
        }

        // All provider config types are covered above
        unreachable!("Unknown provider config type")
    }
}

impl Clone for GeneratorConfig {
    fn clone(&self) -> Self {
        Self {
            provider: self.clone_provider(),
            params: self.params.clone(),
        }
    }
}

/// OpenAI-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub default_model: String,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            default_model: "gpt-3.5-turbo-1106".to_string(),
        }
    }
}

impl ProviderConfig for OpenAIConfig {
    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn validate(&self) -> GenResult<()> {
        if self.api_key.is_none() {
            return Err(GenError::configuration_error("OpenAI API key is required"));
        }
        Ok(())
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Gemini-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub default_model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            default_model: "gemini-2.5-flash".to_string(),
        }
    }
}

impl ProviderConfig for GeminiConfig {
    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn validate(&self) -> GenResult<()> {
        if self.api_key.is_none() {
            return Err(GenError::configuration_error("Gemini API key is required"));
        }
        Ok(())
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl GeneratorConfig {
    /// Create configuration for a specific provider with generic parameters
    ///
    /// # Errors
    ///
    /// Returns [`GenError::UnsupportedProvider`] if the provider name is not
    /// recognized. Supported providers are: "openai", "gemini".
    ///
    /// Returns [`GenError::ConfigurationError`] if provider-specific
    /// validation fails (e.g., missing API key).
    pub fn create_provider(
        provider_name: &str,
        api_key: Option<String>,
        base_url: Option<String>,
        model: Option<String>,
    ) -> GenResult<Self> {
        log_debug!(
            provider = %provider_name,
            has_api_key = api_key.is_some(),
            has_base_url = base_url.is_some(),
            has_model = model.is_some(),
            "Creating provider configuration"
        );

        let provider: Box<dyn ProviderConfig> = match provider_name.to_lowercase().as_str() {
            "openai" => Self::build_openai(api_key, base_url, model),
            "gemini" => Self::build_gemini(api_key, base_url, model),
            _ => return Err(GenError::unsupported_provider(provider_name)),
        };

        provider.validate()?;

        Ok(Self {
            provider,
            params: GenerationParams::default(),
        })
    }

    fn build_openai(
        api_key: Option<String>,
        base_url: Option<String>,
        model: Option<String>,
    ) -> Box<dyn ProviderConfig> {
        let mut config = OpenAIConfig::default();
        if let Some(key) = api_key {
            config.api_key = Some(key);
        }
        if let Some(url) = base_url {
            config.base_url = url;
        }
        if let Some(m) = model {
            config.default_model = m;
        }
        Box::new(config)
    }

    fn build_gemini(
        api_key: Option<String>,
        base_url: Option<String>,
        model: Option<String>,
    ) -> Box<dyn ProviderConfig> {
        let mut config = GeminiConfig::default();
        if let Some(key) = api_key {
            config.api_key = Some(key);
        }
        if let Some(url) = base_url {
            config.base_url = url;
        }
        if let Some(m) = model {
            config.default_model = m;
        }
        Box::new(config)
    }

    /// Load configuration from environment variables
    ///
    /// This is the ONLY method that should access environment variables.
    /// `TESTGEN_PROVIDER` selects the backend ("openai" by default);
    /// `OPENAI_API_KEY` / `GEMINI_API_KEY` carry the credential and
    /// `OPENAI_BASE_URL` / `GEMINI_BASE_URL` optionally override the
    /// endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::ConfigurationError`] if the credential for the
    /// selected provider is absent, and [`GenError::UnsupportedProvider`]
    /// if `TESTGEN_PROVIDER` names an unrecognized backend.
    pub fn from_env() -> GenResult<Self> {
        let provider_name =
            std::env::var("TESTGEN_PROVIDER").unwrap_or_else(|_| "openai".to_string());

        log_debug!(
            target_provider = %provider_name,
            "Loading generator configuration from environment"
        );

        let provider: Box<dyn ProviderConfig> = match provider_name.to_lowercase().as_str() {
            "openai" => Self::openai_from_env(),
            "gemini" => Self::gemini_from_env(),
            _ => return Err(GenError::unsupported_provider(provider_name)),
        };

        provider.validate()?;

        log_debug!(
            provider = provider.provider_name(),
            base_url = provider.base_url(),
            default_model = provider.default_model(),
            has_api_key = provider.api_key().is_some(),
            "Generator configuration loaded and validated"
        );

        Ok(Self {
            provider,
            params: GenerationParams::default(),
        })
    }

    fn openai_from_env() -> Box<dyn ProviderConfig> {
        let mut config = OpenAIConfig::default();
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            config.api_key = Some(api_key);
        }
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.default_model = model;
        }
        Box::new(config)
    }

    fn gemini_from_env() -> Box<dyn ProviderConfig> {
        let mut config = GeminiConfig::default();
        if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            config.api_key = Some(api_key);
        }
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config.default_model = model;
        }
        Box::new(config)
    }
}
