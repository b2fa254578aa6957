//! In-process HTTP mock engine.
//!
//! A [`Scope`] groups interceptors under one base URL. Interceptors are
//! declared per HTTP method, narrowed with body, query and header matchers,
//! and armed by defining a reply. Requests handed to [`Scope::dispatch`] are
//! answered by the first matching armed interceptor, and every
//! match-and-reply is announced to the scope's `on_replied` listeners.

pub mod error;
pub mod matching;
pub mod mocks;
pub mod types;

pub use error::EngineError;
pub use mocks::{Interceptor, Scope};
pub use types::matcher::{BodyMatcher, HeadersMatcher, QueryMatcher};
pub use types::payload::{Body, ParamValue};
pub use types::request::{InterceptorId, RepliedRequest, Request, Response};
pub use types::route::{HttpMethod, PathPattern};
