//! Request matchers an interceptor can be narrowed with.

use crate::types::payload::ParamValue;
use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;

/// Body matcher - a JSON value (subset match) or a regex over the body text
#[derive(Debug, Clone)]
pub enum BodyMatcher {
    Value(Value),
    Regex(Regex),
}

impl PartialEq for BodyMatcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (BodyMatcher::Value(a), BodyMatcher::Value(b)) => a == b,
            (BodyMatcher::Regex(a), BodyMatcher::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl From<Value> for BodyMatcher {
    fn from(v: Value) -> Self {
        BodyMatcher::Value(v)
    }
}

impl From<&str> for BodyMatcher {
    fn from(s: &str) -> Self {
        BodyMatcher::Value(Value::String(s.to_owned()))
    }
}

impl From<Regex> for BodyMatcher {
    fn from(r: Regex) -> Self {
        BodyMatcher::Regex(r)
    }
}

impl Serialize for BodyMatcher {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            BodyMatcher::Value(v) => v.serialize(serializer),
            BodyMatcher::Regex(r) => {
                let mut map = serde_json::Map::new();
                map.insert("regex".to_owned(), Value::String(r.as_str().to_owned()));
                map.serialize(serializer)
            }
        }
    }
}

/// Query matcher - any query, or a key/value subset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMatcher {
    Any,
    Map(HashMap<String, ParamValue>),
}

impl QueryMatcher {
    pub fn map<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        QueryMatcher::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Serialize for QueryMatcher {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            QueryMatcher::Any => true.serialize(serializer),
            QueryMatcher::Map(map) => map.serialize(serializer),
        }
    }
}

/// Headers a request must carry; names compare case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HeadersMatcher(pub HashMap<String, String>);

impl HeadersMatcher {
    pub fn map<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        HeadersMatcher(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }
}
