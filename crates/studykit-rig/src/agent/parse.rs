//! Lenient parsing of model output.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Error, Result, TRACING_TARGET};

/// Removes a surrounding Markdown code fence, if present.
pub(crate) fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. `json`) on the opening line.
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parses a list of items from a model response.
///
/// Accepts a bare JSON array, or an object holding the array under one of
/// `keys` (or under its only array-valued field). Text around the JSON is
/// ignored. Items that do not match `T` are skipped; the call only fails when
/// no JSON can be found or a non-empty list yields nothing usable.
pub(crate) fn parse_items<T: DeserializeOwned>(response: &str, keys: &[&str]) -> Result<Vec<T>> {
    let value = parse_json(response)?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut object) => {
            let key = keys
                .iter()
                .find(|key| object.get(**key).is_some_and(Value::is_array))
                .map(|key| key.to_string())
                .or_else(|| {
                    object
                        .iter()
                        .find(|(_, value)| value.is_array())
                        .map(|(key, _)| key.clone())
                });

            match key.and_then(|key| object.remove(&key)) {
                Some(Value::Array(items)) => items,
                _ => return Err(Error::parse("response object does not contain a list")),
            }
        }
        _ => return Err(Error::parse("response is neither a list nor an object")),
    };

    let total = items.len();
    let parsed: Vec<T> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(item) => Some(item),
            Err(error) => {
                tracing::debug!(target: TRACING_TARGET, %error, "Skipping malformed item");
                None
            }
        })
        .collect();

    if total > 0 && parsed.is_empty() {
        return Err(Error::parse(format!("none of the {total} items matched the expected shape")));
    }

    Ok(parsed)
}

fn parse_json(response: &str) -> Result<Value> {
    let body = strip_code_fence(response);
    if let Ok(value) = serde_json::from_str(body) {
        return Ok(value);
    }

    // Fall back to the outermost bracketed span.
    let candidates = [('[', ']'), ('{', '}')];
    for (open, close) in candidates {
        if let (Some(start), Some(end)) = (body.find(open), body.rfind(close))
            && start < end
            && let Ok(value) = serde_json::from_str(&body[start..=end])
        {
            return Ok(value);
        }
    }

    Err(Error::parse("response does not contain valid JSON"))
}
