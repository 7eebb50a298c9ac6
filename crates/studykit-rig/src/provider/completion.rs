//! Completion provider abstraction.

use std::sync::Arc;

use rig::completion::{AssistantContent, CompletionError, CompletionModel as RigCompletionModel};
use rig::one_or_many::OneOrMany;
use rig::prelude::CompletionClient;
use rig::providers::{anthropic, gemini, openai};
use serde::{Deserialize, Serialize};

use super::credentials::Credentials;
use super::model::CompletionModel;
use crate::{Error, Result};

/// Sampling settings applied to every completion request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionSettings {
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum number of tokens in the response.
    pub max_tokens: u64,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 4096,
        }
    }
}

/// Completion provider that wraps different rig completion model implementations.
///
/// This is a cheaply cloneable wrapper around an `Arc<CompletionService>`.
#[derive(Clone)]
pub struct CompletionProvider {
    service: Arc<CompletionService>,
    settings: CompletionSettings,
}

enum CompletionService {
    OpenAi {
        model: openai::CompletionModel,
        model_name: String,
    },
    Anthropic {
        model: anthropic::completion::CompletionModel,
        model_name: String,
    },
    Gemini {
        model: gemini::completion::CompletionModel,
        model_name: String,
    },
}

impl CompletionProvider {
    /// Connects to the provider named by `credentials` using `model`.
    pub fn connect(model: CompletionModel, credentials: Credentials) -> Result<Self> {
        let provider = credentials.provider();
        let service = match (credentials, model) {
            (Credentials::OpenAi(c), CompletionModel::OpenAi(m)) => {
                let client = openai::Client::new(&c.api_key)
                    .map_err(|e| Error::provider(provider, e))?
                    .completions_api();
                CompletionService::OpenAi {
                    model: client.completion_model(m.as_ref()),
                    model_name: m.to_string(),
                }
            }
            (Credentials::Anthropic(c), CompletionModel::Anthropic(m)) => {
                let client = anthropic::Client::new(&c.api_key)
                    .map_err(|e| Error::provider(provider, e))?;
                CompletionService::Anthropic {
                    model: client.completion_model(m.as_ref()),
                    model_name: m.to_string(),
                }
            }
            (Credentials::Gemini(c), CompletionModel::Gemini(m)) => {
                let client =
                    gemini::Client::new(&c.api_key).map_err(|e| Error::provider(provider, e))?;
                CompletionService::Gemini {
                    model: client.completion_model(m.as_ref()),
                    model_name: m.to_string(),
                }
            }
            (_, model) => {
                return Err(Error::config(format!(
                    "{provider} credentials cannot be used with {} model {}",
                    model.provider(),
                    model.as_str()
                )));
            }
        };

        Ok(Self {
            service: Arc::new(service),
            settings: CompletionSettings::default(),
        })
    }

    /// Replaces the sampling settings.
    pub fn with_settings(mut self, settings: CompletionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the sampling settings.
    pub fn settings(&self) -> CompletionSettings {
        self.settings
    }

    /// Returns the model name.
    pub fn model_name(&self) -> &str {
        match self.service.as_ref() {
            CompletionService::OpenAi { model_name, .. } => model_name,
            CompletionService::Anthropic { model_name, .. } => model_name,
            CompletionService::Gemini { model_name, .. } => model_name,
        }
    }

    /// Returns the provider name.
    pub fn provider_name(&self) -> &'static str {
        match self.service.as_ref() {
            CompletionService::OpenAi { .. } => "openai",
            CompletionService::Anthropic { .. } => "anthropic",
            CompletionService::Gemini { .. } => "gemini",
        }
    }

    /// Sends a single completion request and returns the text of the reply.
    pub async fn complete(&self, preamble: &str, prompt: &str) -> Result<String> {
        let provider = self.provider_name();
        let map_err = |e: CompletionError| Error::provider(provider, e);
        let CompletionSettings {
            temperature,
            max_tokens,
        } = self.settings;

        match self.service.as_ref() {
            CompletionService::OpenAi { model, .. } => model
                .completion_request(prompt)
                .preamble(preamble.to_owned())
                .temperature(temperature)
                .max_tokens(max_tokens)
                .send()
                .await
                .map(|r| extract_text_content(&r.choice))
                .map_err(map_err),
            CompletionService::Anthropic { model, .. } => model
                .completion_request(prompt)
                .preamble(preamble.to_owned())
                .temperature(temperature)
                .max_tokens(max_tokens)
                .send()
                .await
                .map(|r| extract_text_content(&r.choice))
                .map_err(map_err),
            CompletionService::Gemini { model, .. } => model
                .completion_request(prompt)
                .preamble(preamble.to_owned())
                .temperature(temperature)
                .max_tokens(max_tokens)
                .send()
                .await
                .map(|r| extract_text_content(&r.choice))
                .map_err(map_err),
        }
    }
}

/// Extracts text content from assistant content choices.
fn extract_text_content(choice: &OneOrMany<AssistantContent>) -> String {
    choice
        .iter()
        .filter_map(|content| match content {
            AssistantContent::Text(text) => Some(text.text()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("")
}

impl std::fmt::Debug for CompletionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionProvider")
            .field("provider", &self.provider_name())
            .field("model", &self.model_name())
            .field("settings", &self.settings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{AnthropicModel, OpenAiModel, ProviderKind};

    #[test]
    fn connect_rejects_mismatched_provider() {
        let credentials = Credentials::new(ProviderKind::OpenAi, "sk-test");
        let model = CompletionModel::Anthropic(AnthropicModel::ClaudeSonnet4);
        let result = CompletionProvider::connect(model, credentials);
        let Err(Error::Config(message)) = result else {
            panic!("expected a configuration error");
        };
        assert!(message.starts_with("openai credentials"));
    }

    #[test]
    fn connect_reports_names() {
        let credentials = Credentials::new(ProviderKind::OpenAi, "sk-test");
        let model = CompletionModel::OpenAi(OpenAiModel::Gpt4oMini);
        let provider = CompletionProvider::connect(model, credentials).unwrap();
        assert_eq!(provider.provider_name(), "openai");
        assert_eq!(provider.model_name(), "gpt-4o-mini");
        assert_eq!(provider.settings(), CompletionSettings::default());
    }
}
