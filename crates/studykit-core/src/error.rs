//! Common error type definitions.

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of errors that can occur in studykit-core operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Input validation failed.
    InvalidInput,
    /// The splitter could not make progress through the text.
    ChunkingFailure,
    /// An operation was attempted in the wrong lifecycle stage.
    InvalidState,
    /// A referenced item does not exist.
    NotFound,
}

/// A structured error type for studykit-core operations.
#[derive(Debug, Error)]
#[error("{kind:?}{}", message.as_ref().map(|m| format!(": {}", m)).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional error message.
    pub message: Option<String>,
    /// Optional source error.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds a source error to this error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Creates a new invalid input error.
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// Creates a new chunking failure.
    pub fn chunking_failure() -> Self {
        Self::new(ErrorKind::ChunkingFailure)
    }

    /// Creates a new invalid state error.
    pub fn invalid_state() -> Self {
        Self::new(ErrorKind::InvalidState)
    }

    /// Creates a new not found error.
    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message() {
        let error = Error::invalid_input().with_message("max_tokens_per_chunk must be positive");
        assert_eq!(
            error.to_string(),
            "InvalidInput: max_tokens_per_chunk must be positive"
        );
    }

    #[test]
    fn display_without_message() {
        assert_eq!(Error::chunking_failure().to_string(), "ChunkingFailure");
    }

    #[test]
    fn kind_str_is_snake_case() {
        assert_eq!(Error::invalid_state().kind_str(), "invalid_state");
        assert_eq!(ErrorKind::ChunkingFailure.as_ref(), "chunking_failure");
    }

    #[test]
    fn source_is_preserved() {
        let source = std::io::Error::other("boom");
        let error = Error::not_found().with_source(source);
        assert!(std::error::Error::source(&error).is_some());
    }
}
