//! Error types for studykit-rig.

use std::fmt;

/// Result type alias for rig operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller supplied unusable input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The content could not be split into chunks.
    #[error("chunking failed: {0}")]
    Chunking(#[source] studykit_core::Error),

    /// Provider error (API call failed, rate limited, etc.)
    #[error("provider error: {provider}: {message}")]
    Provider { provider: String, message: String },

    /// A generation call for one chunk failed.
    #[error("generation failed for chunk {chunk_index}: {message}")]
    Generation { chunk_index: usize, message: String },

    /// The model answered with output that could not be interpreted.
    #[error("unparsable model output: {0}")]
    Parse(String),

    /// Every call succeeded but nothing usable came back.
    #[error("no content generated")]
    EmptyResult,

    /// The run was cancelled before it finished.
    #[error("generation cancelled")]
    Cancelled,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creates an invalid input error.
    pub fn invalid_input(message: impl fmt::Display) -> Self {
        Self::InvalidInput(message.to_string())
    }

    /// Creates a provider error.
    pub fn provider(provider: impl fmt::Display, message: impl fmt::Display) -> Self {
        Self::Provider {
            provider: provider.to_string(),
            message: message.to_string(),
        }
    }

    /// Creates a generation error for the chunk at `chunk_index`.
    pub fn generation(chunk_index: usize, message: impl fmt::Display) -> Self {
        Self::Generation {
            chunk_index,
            message: message.to_string(),
        }
    }

    /// Creates a parse error.
    pub fn parse(message: impl fmt::Display) -> Self {
        Self::Parse(message.to_string())
    }

    /// Creates a configuration error.
    pub fn config(message: impl fmt::Display) -> Self {
        Self::Config(message.to_string())
    }

    /// Attributes this error to the chunk at `chunk_index`.
    ///
    /// Cancellation and errors already tied to a chunk are returned unchanged.
    pub fn at_chunk(self, chunk_index: usize) -> Self {
        match self {
            Self::Cancelled | Self::Generation { .. } => self,
            other => Self::generation(chunk_index, other),
        }
    }

    /// Returns the index of the chunk that failed, if known.
    pub fn chunk_index(&self) -> Option<usize> {
        match self {
            Self::Generation { chunk_index, .. } => Some(*chunk_index),
            _ => None,
        }
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Provider { .. } | Self::Generation { .. })
    }
}

impl From<studykit_core::Error> for Error {
    fn from(error: studykit_core::Error) -> Self {
        match error.kind() {
            studykit_core::ErrorKind::ChunkingFailure => Self::Chunking(error),
            _ => Self::InvalidInput(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_chunk_wraps_provider_errors() {
        let error = Error::provider("openai", "rate limited").at_chunk(3);
        assert_eq!(error.chunk_index(), Some(3));
        assert!(error.to_string().contains("chunk 3"));
        assert!(error.to_string().contains("rate limited"));
    }

    #[test]
    fn at_chunk_keeps_existing_context() {
        let error = Error::generation(1, "boom").at_chunk(5);
        assert_eq!(error.chunk_index(), Some(1));
        assert!(matches!(Error::Cancelled.at_chunk(2), Error::Cancelled));
    }

    #[test]
    fn core_errors_are_classified() {
        let error: Error = studykit_core::Error::chunking_failure().into();
        assert!(matches!(error, Error::Chunking(_)));

        let error: Error = studykit_core::Error::invalid_input().with_message("bad").into();
        assert!(matches!(error, Error::InvalidInput(_)));
    }

    #[test]
    fn retryable_errors() {
        assert!(Error::provider("anthropic", "overloaded").is_retryable());
        assert!(!Error::EmptyResult.is_retryable());
        assert!(!Error::Cancelled.is_retryable());
    }
}
