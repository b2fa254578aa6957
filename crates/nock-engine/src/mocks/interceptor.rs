//! Interceptor builder: a route declared on a scope, armed by defining a reply.

use crate::mocks::scope::{ArmedInterceptor, Scope};
use crate::types::matcher::{BodyMatcher, HeadersMatcher, QueryMatcher};
use crate::types::payload::Body;
use crate::types::request::{InterceptorId, Response};
use crate::types::route::{HttpMethod, PathPattern};
use std::collections::HashMap;

/// Route declared on a [`Scope`] that answers nothing until a reply is defined.
#[derive(Debug)]
pub struct Interceptor {
    scope: Scope,
    id: InterceptorId,
    method: HttpMethod,
    path: PathPattern,
    body: Option<BodyMatcher>,
    query: Option<QueryMatcher>,
    headers: Option<HeadersMatcher>,
    times: usize,
}

impl Interceptor {
    pub(crate) fn new(scope: Scope, id: InterceptorId, method: HttpMethod, path: PathPattern) -> Self {
        Self {
            scope,
            id,
            method,
            path,
            body: None,
            query: None,
            headers: None,
            times: 1,
        }
    }

    pub fn id(&self) -> InterceptorId {
        self.id
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &PathPattern {
        &self.path
    }

    pub fn body_matcher(&self) -> Option<&BodyMatcher> {
        self.body.as_ref()
    }

    pub fn query_matcher(&self) -> Option<&QueryMatcher> {
        self.query.as_ref()
    }

    pub fn headers_matcher(&self) -> Option<&HeadersMatcher> {
        self.headers.as_ref()
    }

    /// Only match requests whose body satisfies `matcher`.
    pub fn body(mut self, matcher: impl Into<BodyMatcher>) -> Self {
        self.body = Some(matcher.into());
        self
    }

    /// Only match requests whose query satisfies `matcher`.
    pub fn query(mut self, matcher: QueryMatcher) -> Self {
        self.query = Some(matcher);
        self
    }

    /// Require a header (name compared case-insensitively).
    pub fn match_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HeadersMatcher::default)
            .insert(name, value);
        self
    }

    pub fn match_headers(mut self, matcher: HeadersMatcher) -> Self {
        self.headers = Some(matcher);
        self
    }

    /// Number of requests this interceptor answers (defaults to one).
    pub fn times(mut self, times: usize) -> Self {
        self.times = times;
        self
    }

    /// Define the reply and arm the interceptor on its scope.
    pub fn reply_with(self, response: Response) -> Scope {
        let Interceptor {
            scope,
            id,
            method,
            path,
            body,
            query,
            headers,
            times,
        } = self;
        scope.arm(ArmedInterceptor {
            id,
            method,
            path,
            body,
            query,
            headers,
            times,
            counter: 0,
            response,
        });
        scope
    }

    pub fn reply(self, status: u16, body: impl Into<Body>) -> Scope {
        self.reply_with(Response {
            status,
            headers: HashMap::new(),
            body: Some(body.into()),
        })
    }

    pub fn reply_with_headers(
        self,
        status: u16,
        body: impl Into<Body>,
        headers: HashMap<String, String>,
    ) -> Scope {
        self.reply_with(Response {
            status,
            headers,
            body: Some(body.into()),
        })
    }
}
