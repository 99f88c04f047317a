//! Path lookups into decoded JSON payloads.
//!
//! Event payloads arrive with a shape that depends on the event type, so
//! callers address values with a flat list of string segments instead of a
//! typed struct. Each segment is a map key or, when the value at that depth is
//! an array, a base-10 index.
//!
//! Missing keys are expected and yield an empty string. A path that cannot
//! apply to the value it walks (a non-integer index into an array, or a
//! segment left over after reaching a scalar) is a caller bug and surfaces as
//! a [`PathError`], or a panic through [`get_value`].

use serde_json::{Map, Value};

use crate::error::PathError;

/// Walk `root` by `path` and return the value found there as text.
///
/// Returns an empty string when a key is absent along the way or when the
/// final value is `null`.
pub fn try_get_value<I, S>(root: &Value, path: I) -> Result<String, PathError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut current = root;

    for segment in path {
        let segment = segment.as_ref();
        match current {
            Value::Object(map) => match map.get(segment) {
                Some(next) => current = next,
                None => {
                    tracing::debug!(segment, "Key absent from payload");
                    return Ok(String::new());
                }
            },
            Value::Array(items) => {
                let index: i64 = segment
                    .parse()
                    .map_err(|_| PathError::NonIntegerIndex(segment.to_string()))?;
                current = usize::try_from(index)
                    .ok()
                    .and_then(|i| items.get(i))
                    .ok_or(PathError::IndexOutOfRange {
                        index,
                        len: items.len(),
                    })?;
            }
            _ => return Err(PathError::NotDescendable(segment.to_string())),
        }
    }

    Ok(value_to_text(current))
}

/// [`try_get_value`] rooted at a bare map rather than a [`Value`].
pub(crate) fn try_get_map_value<I, S>(
    map: &Map<String, Value>,
    path: I,
) -> Result<String, PathError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut path = path.into_iter();
    let Some(first) = path.next() else {
        return Ok(Value::Object(map.clone()).to_string());
    };

    match map.get(first.as_ref()) {
        Some(next) => try_get_value(next, path),
        None => {
            tracing::debug!(segment = first.as_ref(), "Key absent from payload");
            Ok(String::new())
        }
    }
}

/// Like [`try_get_value`], but panics on a path that does not fit the payload.
///
/// The panic message is the [`PathError`] display text.
pub fn get_value<I, S>(root: &Value, path: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    try_get_value(root, path).unwrap_or_else(|err| panic!("{err}"))
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Containers print as compact JSON.
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
