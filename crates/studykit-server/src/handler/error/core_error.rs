//! Core error to HTTP error conversion.

use studykit_core::ErrorKind as CoreErrorKind;

use super::http_error::{Error as HttpError, ErrorKind};
use crate::TRACING_TARGET_ERROR;

impl From<studykit_core::Error> for HttpError<'static> {
    fn from(error: studykit_core::Error) -> Self {
        tracing::warn!(
            target: TRACING_TARGET_ERROR,
            error = %error,
            error_kind = error.kind_str(),
            "Core operation rejected"
        );

        let message = error.message.clone().unwrap_or_else(|| error.to_string());
        match error.kind() {
            CoreErrorKind::InvalidInput | CoreErrorKind::NotFound => {
                ErrorKind::BadRequest.with_message(message)
            }
            CoreErrorKind::InvalidState => ErrorKind::Conflict.with_message(message),
            CoreErrorKind::ChunkingFailure => ErrorKind::InternalServerError
                .with_message("Failed to split content into chunks")
                .with_context(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_state_is_conflict() {
        let error = HttpError::from(studykit_core::Error::invalid_state().with_message("not yet"));
        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(error.message(), Some("not yet"));
    }

    #[test]
    fn not_found_is_bad_request() {
        let error = HttpError::from(studykit_core::Error::not_found().with_message("question 9"));
        assert_eq!(error.kind(), ErrorKind::BadRequest);
    }
}
