//! Request tracking for nock-engine scopes.
//!
//! [`nock`] creates a scope whose routes record every request they reply
//! to. Records land in a [`RequestTracker`], in the order the replies were
//! observed, and can be filtered by route path or method:
//!
//! ```
//! use nock_tracker::{Request, RequestTracker, TrackedScope};
//!
//! let tracker = RequestTracker::new();
//! let scope = TrackedScope::with_tracker("https://api.example.com", tracker.clone())?;
//! scope.get("/users").reply(200, serde_json::json!([]));
//!
//! scope.dispatch(&Request::get("https://api.example.com/users"))?;
//!
//! let requests = tracker.get_requests_for_path("/users");
//! assert_eq!(requests.len(), 1);
//! assert_eq!(requests[0].method, "GET");
//! # Ok::<(), nock_tracker::EngineError>(())
//! ```

mod scope;
mod tracker;
mod types;

pub use scope::{nock, TrackedInterceptor, TrackedScope};
pub use tracker::{interceptor_path_matches, RequestLog, RequestTracker};
pub use types::{InterceptorDescriptor, TrackedRequest};

pub use nock_engine::{
    Body, BodyMatcher, EngineError, HeadersMatcher, HttpMethod, ParamValue, PathPattern,
    QueryMatcher, Request, Response,
};
