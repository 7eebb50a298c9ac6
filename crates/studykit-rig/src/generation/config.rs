//! Generation configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use studykit_core::chunking::ChunkingOptions;

use super::runner::Pacing;
use crate::{Error, Result};

/// Default values for configuration options.
mod defaults {
    /// Content longer than this many characters is chunked.
    pub const CHUNKING_THRESHOLD_CHARS: usize = 10_000;

    /// Token budget per chunk.
    pub const MAX_TOKENS_PER_CHUNK: usize = 15_000;

    /// Words shared between consecutive chunks.
    pub const CHUNK_OVERLAP_WORDS: usize = 100;

    /// Whether chunk boundaries snap to sentence ends.
    pub const PRESERVE_SENTENCES: bool = true;

    /// Per-chunk cap on requested items.
    pub const MAX_ITEMS_PER_CHUNK: usize = studykit_core::chunking::MAX_ITEMS_PER_CHUNK;

    /// Pause between consecutive model calls in milliseconds.
    pub const CALL_DELAY_MS: u64 = 1_000;
}

/// What to do when a single chunk's generation call fails.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString)]
#[cfg_attr(feature = "config", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failing chunk and return its error.
    Abort,
    /// Log and skip failing chunks, returning whatever succeeded.
    #[default]
    Isolate,
}

/// Configuration for chunked generation.
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[serde(default)]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct GenerationConfig {
    /// Content longer than this many characters is split into chunks.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CHUNKING_THRESHOLD_CHARS", default_value = "10000")
    )]
    #[builder(default = "defaults::CHUNKING_THRESHOLD_CHARS")]
    pub chunking_threshold_chars: usize,

    /// Estimated token budget per chunk.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "MAX_TOKENS_PER_CHUNK", default_value = "15000")
    )]
    #[builder(default = "defaults::MAX_TOKENS_PER_CHUNK")]
    pub max_tokens_per_chunk: usize,

    /// Number of words repeated at the start of each following chunk.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CHUNK_OVERLAP_WORDS", default_value = "100")
    )]
    #[builder(default = "defaults::CHUNK_OVERLAP_WORDS")]
    pub chunk_overlap_words: usize,

    /// Snap chunk boundaries to sentence ends where possible.
    #[cfg_attr(
        feature = "config",
        arg(
            long,
            env = "PRESERVE_SENTENCES",
            default_value = "true",
            action = clap::ArgAction::Set
        )
    )]
    #[builder(default = "defaults::PRESERVE_SENTENCES")]
    pub preserve_sentences: bool,

    /// Upper bound on the items requested from a single chunk.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "MAX_ITEMS_PER_CHUNK", default_value = "15")
    )]
    #[builder(default = "defaults::MAX_ITEMS_PER_CHUNK")]
    pub max_items_per_chunk: usize,

    /// Pause between consecutive model calls in milliseconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "GENERATION_CALL_DELAY_MS", default_value = "1000")
    )]
    #[builder(default = "defaults::CALL_DELAY_MS")]
    pub call_delay_ms: u64,

    /// Behaviour when a chunk's generation call fails.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "GENERATION_FAILURE_POLICY", value_enum, default_value = "isolate")
    )]
    #[builder(default)]
    pub failure_policy: FailurePolicy,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            chunking_threshold_chars: defaults::CHUNKING_THRESHOLD_CHARS,
            max_tokens_per_chunk: defaults::MAX_TOKENS_PER_CHUNK,
            chunk_overlap_words: defaults::CHUNK_OVERLAP_WORDS,
            preserve_sentences: defaults::PRESERVE_SENTENCES,
            max_items_per_chunk: defaults::MAX_ITEMS_PER_CHUNK,
            call_delay_ms: defaults::CALL_DELAY_MS,
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl GenerationConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::default()
    }

    /// Validates a configuration that was not produced by the builder.
    pub fn validate(&self) -> Result<()> {
        check_positive("chunking threshold", self.chunking_threshold_chars)
            .and_then(|()| check_positive("max tokens per chunk", self.max_tokens_per_chunk))
            .and_then(|()| check_positive("max items per chunk", self.max_items_per_chunk))
            .map_err(Error::config)
    }

    /// Chunking options derived from this configuration.
    pub fn chunking_options(&self) -> ChunkingOptions {
        ChunkingOptions::default()
            .with_max_tokens_per_chunk(self.max_tokens_per_chunk)
            .with_overlap_size(self.chunk_overlap_words)
            .with_preserve_sentences(self.preserve_sentences)
    }

    /// Pause between consecutive model calls.
    pub fn call_delay(&self) -> Duration {
        Duration::from_millis(self.call_delay_ms)
    }

    /// Pacing strategy derived from the call delay.
    pub fn pacing(&self) -> Pacing {
        if self.call_delay_ms == 0 {
            Pacing::Immediate
        } else {
            Pacing::FixedDelay(self.call_delay())
        }
    }
}

impl GenerationConfigBuilder {
    fn validate(builder: &GenerationConfigBuilder) -> std::result::Result<(), String> {
        if let Some(threshold) = builder.chunking_threshold_chars {
            check_positive("chunking threshold", threshold)?;
        }

        if let Some(max_tokens) = builder.max_tokens_per_chunk {
            check_positive("max tokens per chunk", max_tokens)?;
        }

        if let Some(max_items) = builder.max_items_per_chunk {
            check_positive("max items per chunk", max_items)?;
        }

        if let Some(delay) = builder.call_delay_ms
            && delay > 60_000
        {
            return Err("call delay cannot exceed 60000 milliseconds".to_string());
        }

        Ok(())
    }
}

fn check_positive(name: &str, value: usize) -> std::result::Result<(), String> {
    if value == 0 {
        return Err(format!("{name} must be greater than 0"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_default() {
        let built = GenerationConfig::builder().build().unwrap();
        let default = GenerationConfig::default();
        assert_eq!(built.chunking_threshold_chars, default.chunking_threshold_chars);
        assert_eq!(built.max_tokens_per_chunk, 15_000);
        assert_eq!(built.chunk_overlap_words, 100);
        assert!(built.preserve_sentences);
        assert_eq!(built.max_items_per_chunk, 15);
        assert_eq!(built.call_delay(), Duration::from_secs(1));
        assert_eq!(built.failure_policy, FailurePolicy::Isolate);
    }

    #[test]
    fn builder_rejects_zero_budget() {
        let result = GenerationConfig::builder()
            .with_max_tokens_per_chunk(0usize)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn builder_rejects_long_delay() {
        let result = GenerationConfig::builder()
            .with_call_delay_ms(120_000u64)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn validate_catches_direct_construction() {
        let config = GenerationConfig {
            max_items_per_chunk: 0,
            ..GenerationConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn chunking_options_follow_config() {
        let config = GenerationConfig::builder()
            .with_max_tokens_per_chunk(500usize)
            .with_chunk_overlap_words(20usize)
            .with_preserve_sentences(false)
            .build()
            .unwrap();

        let options = config.chunking_options();
        assert_eq!(options.max_tokens_per_chunk, 500);
        assert_eq!(options.overlap_size, 20);
        assert!(!options.preserve_sentences);
    }

    #[test]
    fn zero_delay_means_immediate() {
        let config = GenerationConfig {
            call_delay_ms: 0,
            ..GenerationConfig::default()
        };
        assert_eq!(config.pacing(), Pacing::Immediate);
        assert_eq!(
            GenerationConfig::default().pacing(),
            Pacing::FixedDelay(Duration::from_secs(1))
        );
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{ "failure_policy": "abort", "call_delay_ms": 0 }"#).unwrap();
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
        assert_eq!(config.chunking_threshold_chars, 10_000);
    }
}
