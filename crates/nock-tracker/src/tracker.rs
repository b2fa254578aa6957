//! Ordered, append-only log of tracked requests.
//!
//! A [`RequestTracker`] is a handle: clones share one log. Each thread has a
//! default instance reachable through [`RequestTracker::shared`], which is the
//! one `nock()` records into. Trackers are single-threaded and never lock.

use crate::types::TrackedRequest;
use nock_engine::PathPattern;
use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
    static SHARED: RequestTracker = RequestTracker::new();
}

/// Read and reset operations over a request log.
pub trait RequestLog {
    /// Every tracked request, in observation order.
    fn get_requests(&self) -> Vec<TrackedRequest>;

    fn clear_requests(&self);

    /// Requests whose interceptor path matches `path`.
    fn get_requests_for_path(&self, path: &str) -> Vec<TrackedRequest>;

    /// Requests whose method equals `method`, ignoring case.
    fn get_requests_for_method(&self, method: &str) -> Vec<TrackedRequest>;
}

#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    requests: Rc<RefCell<Vec<TrackedRequest>>>,
}

impl RequestTracker {
    /// Create an independent, empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default log of the current thread.
    ///
    /// Each thread gets its own log; records made on one thread are not
    /// visible through another thread's `shared()`.
    pub fn shared() -> Self {
        SHARED.with(Clone::clone)
    }

    /// True when both handles point at the same log.
    pub fn same_log(&self, other: &RequestTracker) -> bool {
        Rc::ptr_eq(&self.requests, &other.requests)
    }

    pub fn add_request(&self, request: TrackedRequest) {
        tracing::trace!(method = %request.method, url = %request.url, "tracking request");
        self.requests.borrow_mut().push(request);
    }

    /// Copy of the log; later changes to the log do not affect it.
    pub fn get_requests(&self) -> Vec<TrackedRequest> {
        self.requests.borrow().clone()
    }

    pub fn clear_requests(&self) {
        let mut requests = self.requests.borrow_mut();
        tracing::debug!(cleared = requests.len(), "clearing tracked requests");
        requests.clear();
    }

    pub fn get_requests_for_path(&self, path: &str) -> Vec<TrackedRequest> {
        self.filtered(|r| interceptor_path_matches(&r.interceptor.path, path))
    }

    pub fn get_requests_for_method(&self, method: &str) -> Vec<TrackedRequest> {
        self.filtered(|r| r.method.eq_ignore_ascii_case(method))
    }

    pub fn len(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.borrow().is_empty()
    }

    fn filtered(&self, predicate: impl Fn(&TrackedRequest) -> bool) -> Vec<TrackedRequest> {
        self.requests
            .borrow()
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }
}

impl RequestLog for RequestTracker {
    fn get_requests(&self) -> Vec<TrackedRequest> {
        RequestTracker::get_requests(self)
    }

    fn clear_requests(&self) {
        RequestTracker::clear_requests(self)
    }

    fn get_requests_for_path(&self, path: &str) -> Vec<TrackedRequest> {
        RequestTracker::get_requests_for_path(self, path)
    }

    fn get_requests_for_method(&self, method: &str) -> Vec<TrackedRequest> {
        RequestTracker::get_requests_for_method(self, method)
    }
}

/// Whether a query path selects requests tracked under `pattern`.
///
/// Literals match an equal path, or one that differs only by a trailing
/// `?query` on either side. Plain string prefixes (`/users` against
/// `/userscount` or `/users/1`) do not match.
pub fn interceptor_path_matches(pattern: &PathPattern, path: &str) -> bool {
    match pattern {
        PathPattern::Literal(literal) => {
            literal == path || extends_with_query(literal, path) || extends_with_query(path, literal)
        }
        PathPattern::Regex(regex) => regex.is_match(path),
    }
}

fn extends_with_query(base: &str, candidate: &str) -> bool {
    candidate
        .strip_prefix(base)
        .is_some_and(|rest| rest.starts_with('?'))
}
