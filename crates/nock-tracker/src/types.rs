//! Records kept by the request tracker.

use chrono::{DateTime, Utc};
use nock_engine::{Body, BodyMatcher, HeadersMatcher, ParamValue, PathPattern, QueryMatcher};
use serde::Serialize;
use std::collections::HashMap;

/// Declaration of the route a tracked request matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterceptorDescriptor {
    /// Uppercase HTTP verb
    pub method: String,
    pub path: PathPattern,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyMatcher>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<QueryMatcher>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeadersMatcher>,
}

impl InterceptorDescriptor {
    pub fn new(method: impl AsRef<str>, path: impl Into<PathPattern>) -> Self {
        Self {
            method: method.as_ref().to_uppercase(),
            path: path.into(),
            body: None,
            query: None,
            headers: None,
        }
    }
}

/// One request that matched an interceptor and was replied to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedRequest {
    /// Uppercase HTTP verb
    pub method: String,
    /// Origin of the scope followed by the observed path
    pub url: String,
    /// Observed path, including the query string when present
    pub path: String,
    pub query: HashMap<String, ParamValue>,
    pub headers: HashMap<String, ParamValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    /// When the reply was observed
    pub timestamp: DateTime<Utc>,
    pub interceptor: InterceptorDescriptor,
    pub matched: bool,
}
