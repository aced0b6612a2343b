use serde_json::{Map, Value};

use crate::error::{DocumentError, DocumentResult};

/// JSON type name of a value, for error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(key: impl Into<String>, expected: &'static str, found: &Value) -> DocumentError {
    DocumentError::TypeMismatch {
        key: key.into(),
        expected,
        found: type_name(found),
    }
}

/// Read a string value. An absent key is `Ok(None)`.
pub fn get_str<'a>(document: &'a Map<String, Value>, key: &str) -> DocumentResult<Option<&'a str>> {
    match document.get(key) {
        None => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(other) => Err(mismatch(key, "string", other)),
    }
}

/// Read an integer value. Numbers without an exact `i64` representation are
/// reported as mismatches rather than truncated.
pub fn get_i64(document: &Map<String, Value>, key: &str) -> DocumentResult<Option<i64>> {
    match document.get(key) {
        None => Ok(None),
        Some(value @ Value::Number(number)) => match number.as_i64() {
            Some(integer) => Ok(Some(integer)),
            None => Err(mismatch(key, "integer", value)),
        },
        Some(other) => Err(mismatch(key, "integer", other)),
    }
}

/// Read a boolean value.
pub fn get_bool(document: &Map<String, Value>, key: &str) -> DocumentResult<Option<bool>> {
    match document.get(key) {
        None => Ok(None),
        Some(Value::Bool(value)) => Ok(Some(*value)),
        Some(other) => Err(mismatch(key, "boolean", other)),
    }
}

/// Read a nested object, borrowed straight from the backing document.
pub fn get_object<'a>(
    document: &'a Map<String, Value>,
    key: &str,
) -> DocumentResult<Option<&'a Map<String, Value>>> {
    match document.get(key) {
        None => Ok(None),
        Some(Value::Object(value)) => Ok(Some(value)),
        Some(other) => Err(mismatch(key, "object", other)),
    }
}

/// Read an array of strings as borrowed elements, in stored order. A
/// non-string element names its index in the reported key.
pub fn get_string_array<'a>(
    document: &'a Map<String, Value>,
    key: &str,
) -> DocumentResult<Option<Vec<&'a str>>> {
    let items = match document.get(key) {
        None => return Ok(None),
        Some(Value::Array(items)) => items,
        Some(other) => return Err(mismatch(key, "array", other)),
    };

    let mut values = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::String(value) => values.push(value.as_str()),
            other => return Err(mismatch(format!("{key}[{index}]"), "string", other)),
        }
    }
    Ok(Some(values))
}
