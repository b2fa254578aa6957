//! Scopes whose replies are recorded into a [`RequestTracker`].
//!
//! [`TrackedScope`] wraps an engine [`Scope`] instead of patching it: route
//! registration goes through [`TrackedScope::intercept`] and friends, which
//! hand back a [`TrackedInterceptor`]. Defining the reply arms the engine
//! interceptor and subscribes an observer that turns every reply of that
//! route into a [`TrackedRequest`].

use crate::tracker::RequestTracker;
use crate::types::{InterceptorDescriptor, TrackedRequest};
use chrono::Utc;
use nock_engine::matching::parse_query_string;
use nock_engine::{
    Body, BodyMatcher, EngineError, HeadersMatcher, HttpMethod, Interceptor, InterceptorId,
    PathPattern, QueryMatcher, RepliedRequest, Response, Scope,
};
use std::collections::HashMap;
use std::ops::Deref;
use url::Url;

/// Create a scope for `base_url` that records into the shared tracker.
///
/// The shared tracker is [`RequestTracker::shared`], one log per thread.
/// Replies are recorded into the log of the thread that created the scope,
/// so another thread's `RequestTracker::shared()` never sees them. Pass a
/// tracker explicitly with [`TrackedScope::with_tracker`] to read the log
/// from elsewhere.
///
/// # Errors
/// Returns error if `base_url` cannot be parsed or has no host.
pub fn nock(base_url: &str) -> Result<TrackedScope, EngineError> {
    TrackedScope::with_tracker(base_url, RequestTracker::shared())
}

/// Engine scope bound to a request tracker.
///
/// Dereferences to the wrapped [`Scope`], so dispatching and completion
/// checks are used exactly as on an untracked scope.
#[derive(Debug, Clone)]
pub struct TrackedScope {
    scope: Scope,
    tracker: RequestTracker,
}

impl TrackedScope {
    /// Create a scope for `base_url` that records into `tracker`.
    ///
    /// # Errors
    /// Returns error if `base_url` cannot be parsed or has no host.
    pub fn with_tracker(base_url: &str, tracker: RequestTracker) -> Result<Self, EngineError> {
        let scope = Scope::new(base_url)?;
        tracing::debug!(origin = %scope.origin(), "tracked scope created");
        Ok(Self { scope, tracker })
    }

    pub fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    /// Wrapped engine scope.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Keep every route answering after its `times` budget is spent.
    ///
    /// Returns the tracked scope so chained routes stay tracked.
    pub fn persist(&self) -> &Self {
        self.scope.persist();
        self
    }

    pub fn intercept(&self, method: HttpMethod, path: impl Into<PathPattern>) -> TrackedInterceptor {
        TrackedInterceptor {
            inner: self.scope.intercept(method, path),
            scope: self.clone(),
        }
    }

    pub fn get(&self, path: impl Into<PathPattern>) -> TrackedInterceptor {
        self.intercept(HttpMethod::Get, path)
    }

    pub fn post(&self, path: impl Into<PathPattern>) -> TrackedInterceptor {
        self.intercept(HttpMethod::Post, path)
    }

    pub fn put(&self, path: impl Into<PathPattern>) -> TrackedInterceptor {
        self.intercept(HttpMethod::Put, path)
    }

    pub fn patch(&self, path: impl Into<PathPattern>) -> TrackedInterceptor {
        self.intercept(HttpMethod::Patch, path)
    }

    pub fn delete(&self, path: impl Into<PathPattern>) -> TrackedInterceptor {
        self.intercept(HttpMethod::Delete, path)
    }

    pub fn head(&self, path: impl Into<PathPattern>) -> TrackedInterceptor {
        self.intercept(HttpMethod::Head, path)
    }

    pub fn options(&self, path: impl Into<PathPattern>) -> TrackedInterceptor {
        self.intercept(HttpMethod::Options, path)
    }
}

impl Deref for TrackedScope {
    type Target = Scope;

    fn deref(&self) -> &Scope {
        &self.scope
    }
}

/// Route awaiting its reply on a [`TrackedScope`].
#[derive(Debug)]
pub struct TrackedInterceptor {
    inner: Interceptor,
    scope: TrackedScope,
}

impl TrackedInterceptor {
    pub fn id(&self) -> InterceptorId {
        self.inner.id()
    }

    /// Declaration recorded on every request this route answers.
    pub fn descriptor(&self) -> InterceptorDescriptor {
        InterceptorDescriptor {
            method: self.inner.method().as_str().to_owned(),
            path: self.inner.path().clone(),
            body: self.inner.body_matcher().cloned(),
            query: self.inner.query_matcher().cloned(),
            headers: self.inner.headers_matcher().cloned(),
        }
    }

    pub fn body(self, matcher: impl Into<BodyMatcher>) -> Self {
        self.map(|i| i.body(matcher))
    }

    pub fn query(self, matcher: QueryMatcher) -> Self {
        self.map(|i| i.query(matcher))
    }

    pub fn match_header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.map(|i| i.match_header(name, value))
    }

    pub fn match_headers(self, matcher: HeadersMatcher) -> Self {
        self.map(|i| i.match_headers(matcher))
    }

    pub fn times(self, times: usize) -> Self {
        self.map(|i| i.times(times))
    }

    /// Define the reply, arm the route and start recording its traffic.
    pub fn reply_with(self, response: Response) -> TrackedScope {
        let id = self.inner.id();
        let descriptor = self.descriptor();
        let TrackedInterceptor { inner, scope } = self;

        let tracker = scope.tracker.clone();
        let base_url = scope.scope.base_url().clone();
        let full_host = scope.scope.origin().to_owned();
        scope.scope.on_replied(move |event| {
            if event.interceptor_id == id {
                tracker.add_request(tracked_request(&base_url, &full_host, &descriptor, event));
            }
        });

        inner.reply_with(response);
        scope
    }

    pub fn reply(self, status: u16, body: impl Into<Body>) -> TrackedScope {
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
    ) -> TrackedScope {
        self.reply_with(Response {
            status,
            headers,
            body: Some(body.into()),
        })
    }

    fn map(self, f: impl FnOnce(Interceptor) -> Interceptor) -> Self {
        Self {
            inner: f(self.inner),
            scope: self.scope,
        }
    }
}

/// Build the record for one reply observed on a route.
///
/// Missing query falls back to parsing the observed path against the base
/// URL; missing headers become an empty map.
pub(crate) fn tracked_request(
    base_url: &Url,
    full_host: &str,
    descriptor: &InterceptorDescriptor,
    event: &RepliedRequest,
) -> TrackedRequest {
    let query = match &event.query {
        Some(query) => query.clone(),
        None => base_url
            .join(&event.path)
            .ok()
            .and_then(|url| url.query().map(parse_query_string))
            .unwrap_or_default(),
    };

    TrackedRequest {
        method: descriptor.method.clone(),
        url: format!("{}{}", full_host, event.path),
        path: event.path.clone(),
        query,
        headers: event.headers.clone().unwrap_or_default(),
        body: event.body.clone(),
        timestamp: Utc::now(),
        interceptor: descriptor.clone(),
        matched: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nock_engine::{ParamValue, Request};
    use rstest::rstest;
    use serde_json::json;

    const BASE: &str = "https://api.example.com";

    fn event(path: &str) -> RepliedRequest {
        RepliedRequest {
            interceptor_id: 1,
            method: HttpMethod::Get,
            path: path.to_owned(),
            query: None,
            headers: None,
            body: None,
        }
    }

    #[rstest]
    fn test_tracked_request_tolerates_missing_fields() {
        let base = Url::parse(BASE).unwrap();
        let descriptor = InterceptorDescriptor::new("get", "/users");

        let record = tracked_request(&base, BASE, &descriptor, &event("/users"));

        assert_eq!(record.method, "GET");
        assert_eq!(record.url, "https://api.example.com/users");
        assert_eq!(record.path, "/users");
        assert!(record.query.is_empty());
        assert!(record.headers.is_empty());
        assert_eq!(record.body, None);
        assert_eq!(record.interceptor, descriptor);
        assert!(record.matched);
    }

    #[rstest]
    fn test_tracked_request_derives_query_from_path() {
        let base = Url::parse(BASE).unwrap();
        let descriptor = InterceptorDescriptor::new("GET", "/users");

        let record = tracked_request(&base, BASE, &descriptor, &event("/users?page=2&tag=a&tag=b"));

        assert_eq!(record.query.get("page"), Some(&ParamValue::from("2")));
        assert_eq!(
            record.query.get("tag"),
            Some(&ParamValue::from(vec!["a".to_string(), "b".to_string()]))
        );
    }

    #[rstest]
    fn test_tracked_request_prefers_observed_query() {
        let base = Url::parse(BASE).unwrap();
        let descriptor = InterceptorDescriptor::new("GET", "/users");
        let observed = RepliedRequest {
            query: Some(HashMap::from([("page".to_string(), ParamValue::from("1"))])),
            headers: Some(HashMap::from([("accept".to_string(), ParamValue::from("*/*"))])),
            body: Some(Body::Json(json!({"a": 1}))),
            ..event("/users?page=7")
        };

        let record = tracked_request(&base, BASE, &descriptor, &observed);

        assert_eq!(record.query.len(), 1);
        assert_eq!(record.query.get("page"), Some(&ParamValue::from("1")));
        assert_eq!(record.headers.get("accept"), Some(&ParamValue::from("*/*")));
        assert_eq!(record.body, Some(Body::Json(json!({"a": 1}))));
    }

    #[rstest]
    #[case("not a url")]
    #[case("/relative/path")]
    fn test_with_tracker_rejects_unparseable_url(#[case] base: &str) {
        let err = TrackedScope::with_tracker(base, RequestTracker::new()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidBaseUrl { .. }));
        assert!(err.to_string().contains(base));
    }

    #[rstest]
    fn test_with_tracker_rejects_hostless_url() {
        let err = TrackedScope::with_tracker("mailto:someone", RequestTracker::new()).unwrap_err();
        assert!(matches!(err, EngineError::MissingHost { .. }));
    }

    #[rstest]
    fn test_chained_persist_keeps_routes_tracked() {
        let tracker = RequestTracker::new();
        let scope = TrackedScope::with_tracker(BASE, tracker.clone()).unwrap();
        scope.persist().get("/health").reply(200, json!({"ok": true}));

        for _ in 0..3 {
            scope.dispatch(&Request::get(format!("{BASE}/health"))).unwrap();
        }

        assert_eq!(tracker.len(), 3);
        assert!(tracker
            .get_requests()
            .iter()
            .all(|r| r.interceptor.path == PathPattern::from("/health")));
    }

    #[rstest]
    fn test_descriptor_includes_matchers() {
        let scope = TrackedScope::with_tracker(BASE, RequestTracker::new()).unwrap();
        let interceptor = scope
            .post("/users")
            .body(json!({"name": "John Doe"}))
            .query(QueryMatcher::Any)
            .match_header("x-trace", "1");

        let descriptor = interceptor.descriptor();
        assert_eq!(descriptor.method, "POST");
        assert_eq!(descriptor.path, PathPattern::from("/users"));
        assert_eq!(descriptor.body, Some(BodyMatcher::Value(json!({"name": "John Doe"}))));
        assert_eq!(descriptor.query, Some(QueryMatcher::Any));
        assert!(descriptor.headers.is_some());
    }

    #[rstest]
    fn test_unarmed_route_records_nothing() {
        let tracker = RequestTracker::new();
        let scope = TrackedScope::with_tracker(BASE, tracker.clone()).unwrap();
        let _pending = scope.get("/users");

        assert!(scope.dispatch(&Request::get(format!("{BASE}/users"))).is_err());
        assert!(tracker.is_empty());
    }

    #[rstest]
    fn test_observer_ignores_other_routes() {
        let tracker = RequestTracker::new();
        let scope = TrackedScope::with_tracker(BASE, tracker.clone()).unwrap();
        scope.get("/users").reply(200, json!([]));
        scope.get("/posts").reply(200, json!([]));

        scope.dispatch(&Request::get(format!("{BASE}/posts"))).unwrap();

        let requests = tracker.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].interceptor.path, PathPattern::from("/posts"));
    }
}
