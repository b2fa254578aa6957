//! Open payload containers for request bodies, query strings and headers.

use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;

/// A query parameter or header value: one string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    Multi(Vec<String>),
}

impl ParamValue {
    /// Append another occurrence of the same key, turning a single value into a list.
    pub fn push(&mut self, value: String) {
        match self {
            ParamValue::Single(existing) => {
                let first = std::mem::take(existing);
                *self = ParamValue::Multi(vec![first, value]);
            }
            ParamValue::Multi(values) => values.push(value),
        }
    }

    /// All values carried, in order of appearance.
    pub fn values(&self) -> Vec<&str> {
        match self {
            ParamValue::Single(s) => vec![s.as_str()],
            ParamValue::Multi(values) => values.iter().map(String::as_str).collect(),
        }
    }

    /// True when every expected value appears among the actual ones.
    pub fn contains_all(&self, expected: &ParamValue) -> bool {
        let actual = self.values();
        expected
            .values()
            .iter()
            .all(|ev| actual.iter().any(|av| av.trim() == ev.trim()))
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Single(s.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Single(s)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::Multi(values)
    }
}

/// Request or response payload of no fixed shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Body {
    Json(Value),
    Text(String),
    Bytes(Vec<u8>),
}

impl Body {
    /// JSON view of the payload, used by body matchers.
    ///
    /// Text that is not JSON is exposed as a JSON string; bytes that are not
    /// JSON have no JSON view.
    pub fn as_json(&self) -> Option<Cow<'_, Value>> {
        match self {
            Body::Json(v) => Some(Cow::Borrowed(v)),
            Body::Text(s) => Some(Cow::Owned(
                serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.clone())),
            )),
            Body::Bytes(b) => serde_json::from_slice(b).ok().map(Cow::Owned),
        }
    }

    /// Text view of the payload, used by regex body matchers.
    ///
    /// JSON is rendered compactly; bytes need to be valid UTF-8.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Body::Json(v) => Some(Cow::Owned(v.to_string())),
            Body::Text(s) => Some(Cow::Borrowed(s)),
            Body::Bytes(b) => std::str::from_utf8(b).ok().map(Cow::Borrowed),
        }
    }
}

impl From<Value> for Body {
    fn from(v: Value) -> Self {
        Body::Json(v)
    }
}

impl From<&str> for Body {
    fn from(s: &str) -> Self {
        Body::Text(s.to_owned())
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Body::Text(s)
    }
}

impl From<Vec<u8>> for Body {
    fn from(b: Vec<u8>) -> Self {
        Body::Bytes(b)
    }
}
