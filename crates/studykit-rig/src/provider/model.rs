//! Type-safe completion model references.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::credentials::ProviderKind;
use crate::{Error, Result};

/// Reference to a completion/chat model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", content = "model", rename_all = "snake_case")]
pub enum CompletionModel {
    /// OpenAI completion models.
    #[serde(rename = "openai")]
    OpenAi(OpenAiModel),
    /// Anthropic models.
    Anthropic(AnthropicModel),
    /// Google Gemini completion models.
    Gemini(GeminiModel),
}

/// OpenAI completion models.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OpenAiModel {
    /// GPT-4o (multimodal flagship)
    #[strum(serialize = "gpt-4o")]
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    /// GPT-4o mini (fast, affordable)
    #[default]
    #[strum(serialize = "gpt-4o-mini")]
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    /// GPT-4.1
    #[strum(serialize = "gpt-4.1")]
    #[serde(rename = "gpt-4.1")]
    Gpt41,
    /// GPT-4.1 mini
    #[strum(serialize = "gpt-4.1-mini")]
    #[serde(rename = "gpt-4.1-mini")]
    Gpt41Mini,
}

/// Anthropic models.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AnthropicModel {
    /// Claude Sonnet 4 (balanced)
    #[default]
    #[strum(serialize = "claude-sonnet-4-20250514")]
    #[serde(rename = "claude-sonnet-4-20250514")]
    ClaudeSonnet4,
    /// Claude Opus 4 (most capable)
    #[strum(serialize = "claude-opus-4-20250514")]
    #[serde(rename = "claude-opus-4-20250514")]
    ClaudeOpus4,
    /// Claude Haiku 3.5 (fast)
    #[strum(serialize = "claude-3-5-haiku-20241022")]
    #[serde(rename = "claude-3-5-haiku-20241022")]
    ClaudeHaiku35,
}

/// Google Gemini completion models.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum GeminiModel {
    /// Gemini 2.0 Flash (fast, multimodal)
    #[default]
    #[strum(serialize = "gemini-2.0-flash")]
    #[serde(rename = "gemini-2.0-flash")]
    Gemini20Flash,
    /// Gemini 1.5 Pro (long context)
    #[strum(serialize = "gemini-1.5-pro")]
    #[serde(rename = "gemini-1.5-pro")]
    Gemini15Pro,
    /// Gemini 1.5 Flash (fast)
    #[strum(serialize = "gemini-1.5-flash")]
    #[serde(rename = "gemini-1.5-flash")]
    Gemini15Flash,
}

impl CompletionModel {
    /// Returns the default model for a provider.
    pub fn default_for(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::OpenAi => Self::OpenAi(OpenAiModel::default()),
            ProviderKind::Anthropic => Self::Anthropic(AnthropicModel::default()),
            ProviderKind::Gemini => Self::Gemini(GeminiModel::default()),
        }
    }

    /// Resolves a model identifier for a provider.
    ///
    /// Falls back to the provider's default model when `name` is `None`.
    pub fn resolve(kind: ProviderKind, name: Option<&str>) -> Result<Self> {
        let Some(name) = name else {
            return Ok(Self::default_for(kind));
        };

        let unknown = |_| Error::config(format!("unknown {kind} model: {name}"));
        match kind {
            ProviderKind::OpenAi => name.parse().map(Self::OpenAi).map_err(unknown),
            ProviderKind::Anthropic => name.parse().map(Self::Anthropic).map_err(unknown),
            ProviderKind::Gemini => name.parse().map(Self::Gemini).map_err(unknown),
        }
    }

    /// Returns the provider this model belongs to.
    pub fn provider(&self) -> ProviderKind {
        match self {
            Self::OpenAi(_) => ProviderKind::OpenAi,
            Self::Anthropic(_) => ProviderKind::Anthropic,
            Self::Gemini(_) => ProviderKind::Gemini,
        }
    }

    /// Returns the model identifier string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::OpenAi(m) => m.as_ref(),
            Self::Anthropic(m) => m.as_ref(),
            Self::Gemini(m) => m.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_defaults() {
        let model = CompletionModel::resolve(ProviderKind::Anthropic, None).unwrap();
        assert_eq!(model, CompletionModel::Anthropic(AnthropicModel::ClaudeSonnet4));
        assert_eq!(model.provider(), ProviderKind::Anthropic);
    }

    #[test]
    fn resolve_named_model() {
        let model = CompletionModel::resolve(ProviderKind::OpenAi, Some("gpt-4o")).unwrap();
        assert_eq!(model.as_str(), "gpt-4o");
    }

    #[test]
    fn resolve_rejects_foreign_model() {
        let result = CompletionModel::resolve(ProviderKind::Gemini, Some("gpt-4o"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn serde_shape() {
        let model = CompletionModel::Gemini(GeminiModel::Gemini15Pro);
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "provider": "gemini", "model": "gemini-1.5-pro" })
        );
    }
}
