//! Validated JSON extractor with automatic validation.
//!
//! This module provides [`ValidateJson`], an enhanced JSON extractor that
//! combines deserialization with automatic validation using the `validator` crate.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::Json;
use crate::TRACING_TARGET_ERROR;
use crate::handler::{Error, ErrorKind};

/// JSON extractor that runs [`Validate`] on the deserialized value.
///
/// Also see [`Json`].
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Creates a new instance of [`ValidateJson`].
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        data.validate()?;
        Ok(Self::new(data))
    }
}

type Params = HashMap<Cow<'static, str>, serde_json::Value>;

/// Formats length validation errors with appropriate units.
fn format_length_error(field: &str, params: &Params) -> String {
    let unit = if field == "content" { "characters" } else { "items" };

    match (number(params, "min"), number(params, "max")) {
        (Some(min), Some(max)) => {
            format!("Field '{field}' must be between {min} and {max} {unit} long")
        }
        (Some(min), None) => format!("Field '{field}' must be at least {min} {unit} long"),
        (None, Some(max)) => format!("Field '{field}' must be at most {max} {unit} long"),
        _ => format!("Field '{field}' has invalid length"),
    }
}

/// Formats range validation errors.
fn format_range_error(field: &str, params: &Params) -> String {
    match (number(params, "min"), number(params, "max")) {
        (Some(min), Some(max)) => format!("Field '{field}' must be between {min} and {max}"),
        (Some(min), None) => format!("Field '{field}' must be at least {min}"),
        (None, Some(max)) => format!("Field '{field}' must be at most {max}"),
        _ => format!("Field '{field}' is out of valid range"),
    }
}

/// Reads an integer parameter from a validation error.
fn number(params: &Params, key: &str) -> Option<i64> {
    params.get(key).and_then(|value| {
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|value| value as i64))
    })
}

/// Formats validation errors with context-aware, user-friendly messages.
fn format_validation_error(field: &str, error: &validator::ValidationError) -> String {
    if let Some(custom_message) = &error.message {
        return format!("Field '{field}': {custom_message}");
    }

    match error.code.as_ref() {
        "required" => format!("Field '{field}' is required and cannot be empty"),
        "length" => format_length_error(field, &error.params),
        "range" => format_range_error(field, &error.params),
        code => format!("Field '{field}' failed validation: {code}"),
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let mut error_messages: Vec<String> = errors
            .errors()
            .iter()
            .flat_map(|(field, kind)| match kind {
                validator::ValidationErrorsKind::Field(field_errors) => field_errors
                    .iter()
                    .map(|error| format_validation_error(field, error))
                    .collect::<Vec<_>>(),
                validator::ValidationErrorsKind::Struct(_)
                | validator::ValidationErrorsKind::List(_) => {
                    vec![format!("Field '{field}' is invalid")]
                }
            })
            .collect();
        error_messages.sort();

        let user_message = match error_messages.as_slice() {
            [] => "Validation failed".to_string(),
            [single_error] => single_error.clone(),
            multiple => multiple.join(". "),
        };

        tracing::warn!(
            target: TRACING_TARGET_ERROR,
            errors = ?errors.field_errors(),
            "Request validation failed"
        );

        ErrorKind::BadRequest
            .with_message(user_message)
            .with_resource("request")
    }
}

#[cfg(test)]
mod tests {
    use validator::ValidationError;

    use super::*;

    #[test]
    fn range_message() {
        let mut error = ValidationError::new("range");
        error.add_param(Cow::Borrowed("min"), &1);
        error.add_param(Cow::Borrowed("max"), &100);
        assert_eq!(
            format_validation_error("count", &error),
            "Field 'count' must be between 1 and 100"
        );
    }

    #[test]
    fn length_message_uses_characters_for_content() {
        let mut error = ValidationError::new("length");
        error.add_param(Cow::Borrowed("min"), &1);
        error.add_param(Cow::Borrowed("max"), &500_000);
        assert_eq!(
            format_validation_error("content", &error),
            "Field 'content' must be between 1 and 500000 characters long"
        );
    }

    #[test]
    fn custom_message_wins() {
        let error = ValidationError::new("exam_quota").with_message(Cow::Borrowed("pick one"));
        assert_eq!(format_validation_error("__all__", &error), "Field '__all__': pick one");
    }
}
