//! Requests handed to a scope, the replies it produces, and reply notifications.

use crate::types::payload::{Body, ParamValue};
use crate::types::route::HttpMethod;
use std::collections::HashMap;

/// Identifier of an interceptor, unique within its scope.
pub type InterceptorId = u64;

/// HTTP request delivered to a scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: HttpMethod,
    /// Absolute URL (scheme, host, optional port, path and query)
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Body>,
}

impl Request {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    pub fn head(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Head, url)
    }

    pub fn options(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Options, url)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Attach a JSON body and the matching content type.
    pub fn json(self, value: serde_json::Value) -> Self {
        self.header("content-type", "application/json").body(value)
    }
}

/// Reply produced by a matched interceptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Option<Body>,
}

/// Payload of the scope's "replied" notification.
///
/// `query` is only populated when the matched interceptor declared a query
/// matcher; `headers` and `body` mirror what the request carried.
#[derive(Debug, Clone, PartialEq)]
pub struct RepliedRequest {
    pub interceptor_id: InterceptorId,
    pub method: HttpMethod,
    /// Path as observed, including the query string when present
    pub path: String,
    pub query: Option<HashMap<String, ParamValue>>,
    pub headers: Option<HashMap<String, ParamValue>>,
    pub body: Option<Body>,
}
