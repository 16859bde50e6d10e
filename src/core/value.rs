//! Property values

use std::borrow::Cow;

/// Dynamically typed property value
///
/// Form inputs arrive as strings, but defaults and programmatic writes may
/// carry any JSON value.
pub type Value = serde_json::Value;

/// Get the textual form of a value, the way an input field would show it
///
/// Strings are returned as-is; `null` becomes the empty string and every
/// other value uses its JSON representation.
pub fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}
