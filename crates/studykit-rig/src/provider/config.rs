//! Provider configuration.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use super::completion::{CompletionProvider, CompletionSettings};
use super::credentials::{Credentials, ProviderKind};
use super::model::CompletionModel;
use crate::{Error, Result, TRACING_TARGET};

/// Configuration for the completion provider.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ProviderConfig {
    /// Completion provider to use.
    #[cfg_attr(
        feature = "config",
        arg(long = "llm-provider", env = "LLM_PROVIDER", value_enum, default_value = "openai")
    )]
    pub provider: ProviderKind,

    /// API key for the completion provider.
    #[cfg_attr(
        feature = "config",
        arg(long = "llm-api-key", env = "LLM_API_KEY", hide_env_values = true)
    )]
    pub api_key: String,

    /// Model identifier; the provider's default model is used when unset.
    #[cfg_attr(feature = "config", arg(long = "llm-model", env = "LLM_MODEL"))]
    pub model: Option<String>,

    /// Sampling temperature.
    #[cfg_attr(
        feature = "config",
        arg(long = "llm-temperature", env = "LLM_TEMPERATURE", default_value = "0.7")
    )]
    pub temperature: f64,

    /// Maximum number of tokens in each response.
    #[cfg_attr(
        feature = "config",
        arg(long = "llm-max-tokens", env = "LLM_MAX_TOKENS", default_value = "4096")
    )]
    pub max_tokens: u64,
}

impl ProviderConfig {
    /// Creates a configuration for `provider` with default settings.
    pub fn new(provider: ProviderKind, api_key: impl Into<String>) -> Self {
        let settings = CompletionSettings::default();
        Self {
            provider,
            api_key: api_key.into(),
            model: None,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }

    /// Sets the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::config("LLM API key must not be empty"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::config("temperature must be between 0.0 and 2.0"));
        }

        if self.max_tokens == 0 {
            return Err(Error::config("max tokens must be greater than 0"));
        }

        CompletionModel::resolve(self.provider, self.model.as_deref())?;
        Ok(())
    }

    /// Returns the resolved completion model.
    pub fn completion_model(&self) -> Result<CompletionModel> {
        CompletionModel::resolve(self.provider, self.model.as_deref())
    }

    /// Returns the sampling settings.
    pub fn settings(&self) -> CompletionSettings {
        CompletionSettings {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Validates the configuration and connects to the provider.
    pub fn connect(&self) -> Result<CompletionProvider> {
        self.validate()?;

        let model = self.completion_model()?;
        let credentials = Credentials::new(self.provider, self.api_key.clone());
        let provider = CompletionProvider::connect(model, credentials)?.with_settings(self.settings());

        tracing::info!(
            target: TRACING_TARGET,
            provider = provider.provider_name(),
            model = provider.model_name(),
            temperature = self.temperature,
            max_tokens = self.max_tokens,
            "Completion provider configured"
        );

        Ok(provider)
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}
