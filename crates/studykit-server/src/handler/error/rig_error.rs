//! Generation error to HTTP error conversion.

use super::http_error::{Error as HttpError, ErrorKind};
use crate::TRACING_TARGET_ERROR;

impl From<studykit_rig::Error> for HttpError<'static> {
    fn from(error: studykit_rig::Error) -> Self {
        use studykit_rig::Error as RigError;

        match &error {
            RigError::InvalidInput(_) | RigError::EmptyResult | RigError::Cancelled => {
                tracing::warn!(target: TRACING_TARGET_ERROR, error = %error, "Generation rejected");
            }
            _ => {
                tracing::error!(
                    target: TRACING_TARGET_ERROR,
                    error = %error,
                    chunk_index = error.chunk_index(),
                    retryable = error.is_retryable(),
                    "Generation failed"
                );
            }
        }

        match error {
            RigError::InvalidInput(message) => ErrorKind::BadRequest
                .with_message(message)
                .with_resource("content"),

            RigError::EmptyResult => {
                ErrorKind::UnprocessableEntity.with_message("No content generated")
            }

            RigError::Cancelled => ErrorKind::ServiceUnavailable
                .with_message("Generation was cancelled")
                .with_context("The server is shutting down"),

            RigError::Chunking(error) => ErrorKind::InternalServerError
                .with_message("Failed to split content into chunks")
                .with_context(error.to_string()),

            RigError::Provider { .. } | RigError::Generation { .. } | RigError::Parse(_) => {
                ErrorKind::BadGateway
                    .with_message("Failed to generate content")
                    .with_context(error.to_string())
            }

            RigError::Config(_) | RigError::Serialization(_) => {
                ErrorKind::InternalServerError.with_context(error.to_string())
            }
        }
    }
}
