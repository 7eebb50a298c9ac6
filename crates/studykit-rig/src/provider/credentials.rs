//! Provider credentials.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Supported completion providers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString)]
#[cfg_attr(feature = "config", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProviderKind {
    /// OpenAI.
    #[default]
    #[strum(serialize = "openai")]
    #[serde(rename = "openai")]
    #[cfg_attr(feature = "config", value(name = "openai"))]
    OpenAi,
    /// Anthropic.
    Anthropic,
    /// Google Gemini.
    Gemini,
}

/// API key credentials for AI providers.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiKeyCredentials {
    /// API key.
    pub api_key: String,
}

impl ApiKeyCredentials {
    /// Creates credentials from an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

impl std::fmt::Debug for ApiKeyCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyCredentials")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Credentials for every supported completion provider.
#[derive(Debug, Clone, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "provider", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Credentials {
    /// OpenAI credentials.
    #[serde(rename = "openai")]
    #[strum(serialize = "openai")]
    OpenAi(ApiKeyCredentials),
    /// Anthropic credentials.
    Anthropic(ApiKeyCredentials),
    /// Google Gemini credentials.
    Gemini(ApiKeyCredentials),
}

impl Credentials {
    /// Creates credentials for the given provider.
    pub fn new(kind: ProviderKind, api_key: impl Into<String>) -> Self {
        let credentials = ApiKeyCredentials::new(api_key);
        match kind {
            ProviderKind::OpenAi => Self::OpenAi(credentials),
            ProviderKind::Anthropic => Self::Anthropic(credentials),
            ProviderKind::Gemini => Self::Gemini(credentials),
        }
    }

    /// Returns the provider name as a string.
    pub fn provider(&self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_names() {
        assert_eq!(Credentials::new(ProviderKind::OpenAi, "k").provider(), "openai");
        assert_eq!(
            Credentials::new(ProviderKind::Anthropic, "k").provider(),
            "anthropic"
        );
        assert_eq!(ProviderKind::Gemini.as_ref(), "gemini");
        assert_eq!("openai".parse::<ProviderKind>().ok(), Some(ProviderKind::OpenAi));
    }

    #[test]
    fn api_key_is_redacted() {
        let credentials = ApiKeyCredentials::new("sk-secret");
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("sk-secret"));
    }

    #[test]
    fn credentials_serde_tag() {
        let json = serde_json::json!({ "provider": "openai", "api_key": "k" });
        let credentials: Credentials = serde_json::from_value(json).unwrap();
        assert!(matches!(credentials, Credentials::OpenAi(_)));
    }
}
