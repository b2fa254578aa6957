//! Route declaration types: HTTP methods and path patterns.

use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// HTTP method for route matching
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// Every method a scope can register routes for.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    /// Uppercase verb, as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the supported verbs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported HTTP method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMethod(s.to_owned()))
    }
}

/// Path a route is declared with: a literal string or a regular expression.
#[derive(Debug, Clone)]
pub enum PathPattern {
    Literal(String),
    Regex(Regex),
}

impl PathPattern {
    /// Source text of the pattern (the literal itself or the regex source).
    pub fn as_str(&self) -> &str {
        match self {
            PathPattern::Literal(s) => s,
            PathPattern::Regex(r) => r.as_str(),
        }
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PathPattern::Literal(a), PathPattern::Literal(b)) => a == b,
            (PathPattern::Regex(a), PathPattern::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathPattern::Literal(s) => f.write_str(s),
            PathPattern::Regex(r) => write!(f, "/{}/", r.as_str()),
        }
    }
}

impl From<&str> for PathPattern {
    fn from(s: &str) -> Self {
        PathPattern::Literal(s.to_owned())
    }
}

impl From<String> for PathPattern {
    fn from(s: String) -> Self {
        PathPattern::Literal(s)
    }
}

impl From<Regex> for PathPattern {
    fn from(r: Regex) -> Self {
        PathPattern::Regex(r)
    }
}

impl Serialize for PathPattern {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PathPattern::Literal(s) => s.serialize(serializer),
            PathPattern::Regex(r) => {
                let mut map = serde_json::Map::new();
                map.insert("regex".to_owned(), Value::String(r.as_str().to_owned()));
                map.serialize(serializer)
            }
        }
    }
}
