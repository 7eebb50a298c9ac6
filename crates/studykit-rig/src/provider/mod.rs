//! Completion providers backed by rig.

mod completion;
mod config;
mod credentials;
mod model;

pub use completion::{CompletionProvider, CompletionSettings};
pub use config::ProviderConfig;
pub use credentials::{ApiKeyCredentials, Credentials, ProviderKind};
pub use model::{AnthropicModel, CompletionModel, GeminiModel, OpenAiModel};
