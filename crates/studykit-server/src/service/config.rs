#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use studykit_rig::provider::ProviderConfig;
use studykit_rig::{GenerationConfig, Result};

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Completion provider settings.
    #[cfg_attr(feature = "config", command(flatten))]
    pub provider: ProviderConfig,

    /// Chunking, pacing and failure handling for generation requests.
    #[cfg_attr(feature = "config", command(flatten))]
    #[serde(default)]
    pub generation: GenerationConfig,
}

impl ServiceConfig {
    /// Creates a new configuration with default generation settings.
    pub fn new(provider: ProviderConfig) -> Self {
        Self {
            provider,
            generation: GenerationConfig::default(),
        }
    }

    /// Replaces the generation settings.
    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    /// Validates both the provider and generation settings.
    pub fn validate(&self) -> Result<()> {
        self.provider.validate()?;
        self.generation.validate()
    }
}
