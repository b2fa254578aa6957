//! Scopes group interceptors under one origin and answer requests for them.
//!
//! A [`Scope`] is a cheap handle: clones share the same interceptors and
//! listeners. Scopes are single-threaded; listeners run synchronously inside
//! [`Scope::dispatch`], after the interceptor is consumed and before the
//! response is handed back.

use crate::error::EngineError;
use crate::matching::{headers_matches, parse_query_string, path_matches, payload_matches, query_matches};
use crate::mocks::interceptor::Interceptor;
use crate::types::matcher::{BodyMatcher, HeadersMatcher, QueryMatcher};
use crate::types::payload::ParamValue;
use crate::types::request::{InterceptorId, RepliedRequest, Request, Response};
use crate::types::route::{HttpMethod, PathPattern};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use url::Url;

/// Listener for the scope's "replied" notification.
pub type RepliedListener = Rc<dyn Fn(&RepliedRequest)>;

/// Interceptor with a reply defined, ready to answer requests.
#[derive(Debug, Clone)]
pub(crate) struct ArmedInterceptor {
    pub id: InterceptorId,
    pub method: HttpMethod,
    pub path: PathPattern,
    pub body: Option<BodyMatcher>,
    pub query: Option<QueryMatcher>,
    pub headers: Option<HeadersMatcher>,
    /// Number of requests this interceptor answers
    pub times: usize,
    /// Number of requests answered so far
    pub counter: usize,
    pub response: Response,
}

impl ArmedInterceptor {
    fn is_exhausted(&self, persist: bool) -> bool {
        !persist && self.counter >= self.times
    }

    fn is_satisfied(&self) -> bool {
        self.counter >= self.times.max(1)
    }

    fn matches(
        &self,
        request: &Request,
        path: &str,
        query: &HashMap<String, ParamValue>,
    ) -> bool {
        self.method == request.method
            && path_matches(&self.path, path)
            && query_matches(self.query.as_ref(), query)
            && headers_matches(self.headers.as_ref(), &request.headers)
            && payload_matches(self.body.as_ref(), request.body.as_ref())
    }
}

#[derive(Default)]
struct ScopeState {
    interceptors: Vec<ArmedInterceptor>,
    listeners: Vec<RepliedListener>,
    next_id: InterceptorId,
    persist: bool,
}

/// Group of interceptors bound to one base URL.
#[derive(Clone)]
pub struct Scope {
    base_url: Url,
    origin: String,
    state: Rc<RefCell<ScopeState>>,
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Scope")
            .field("origin", &self.origin)
            .field("interceptors", &state.interceptors)
            .field("listeners", &state.listeners.len())
            .field("persist", &state.persist)
            .finish()
    }
}

/// `scheme://host[:port]` of a URL, omitting the scheme's default port.
pub fn origin_of(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}

impl Scope {
    /// Create a scope for `base_url`.
    ///
    /// # Errors
    /// Returns error if the URL cannot be parsed or has no host.
    pub fn new(base_url: &str) -> Result<Self, EngineError> {
        let parsed = Url::parse(base_url).map_err(|source| EngineError::InvalidBaseUrl {
            url: base_url.to_owned(),
            source,
        })?;
        let origin = origin_of(&parsed).ok_or_else(|| EngineError::MissingHost {
            url: base_url.to_owned(),
        })?;

        Ok(Self {
            base_url: parsed,
            origin,
            state: Rc::new(RefCell::new(ScopeState::default())),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `scheme://host[:port]` every request must target.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Start declaring an interceptor. It answers nothing until a reply is defined.
    pub fn intercept(&self, method: HttpMethod, path: impl Into<PathPattern>) -> Interceptor {
        let id = {
            let mut state = self.state.borrow_mut();
            state.next_id += 1;
            state.next_id
        };
        Interceptor::new(self.clone(), id, method, path.into())
    }

    pub fn get(&self, path: impl Into<PathPattern>) -> Interceptor {
        self.intercept(HttpMethod::Get, path)
    }

    pub fn post(&self, path: impl Into<PathPattern>) -> Interceptor {
        self.intercept(HttpMethod::Post, path)
    }

    pub fn put(&self, path: impl Into<PathPattern>) -> Interceptor {
        self.intercept(HttpMethod::Put, path)
    }

    pub fn patch(&self, path: impl Into<PathPattern>) -> Interceptor {
        self.intercept(HttpMethod::Patch, path)
    }

    pub fn delete(&self, path: impl Into<PathPattern>) -> Interceptor {
        self.intercept(HttpMethod::Delete, path)
    }

    pub fn head(&self, path: impl Into<PathPattern>) -> Interceptor {
        self.intercept(HttpMethod::Head, path)
    }

    pub fn options(&self, path: impl Into<PathPattern>) -> Interceptor {
        self.intercept(HttpMethod::Options, path)
    }

    pub(crate) fn arm(&self, interceptor: ArmedInterceptor) {
        tracing::debug!(
            origin = %self.origin,
            id = interceptor.id,
            method = %interceptor.method,
            path = %interceptor.path,
            times = interceptor.times,
            "interceptor armed"
        );
        self.state.borrow_mut().interceptors.push(interceptor);
    }

    /// Keep interceptors answering after their `times` budget is spent.
    pub fn persist(&self) -> &Self {
        self.state.borrow_mut().persist = true;
        self
    }

    /// Subscribe to every match-and-reply on this scope.
    pub fn on_replied(&self, listener: impl Fn(&RepliedRequest) + 'static) {
        self.state.borrow_mut().listeners.push(Rc::new(listener));
    }

    /// Answer `request` with the first matching interceptor that still has budget.
    ///
    /// # Errors
    /// Returns error if the URL is invalid or no interceptor matches.
    pub fn dispatch(&self, request: &Request) -> Result<Response, EngineError> {
        let url = Url::parse(&request.url).map_err(|source| EngineError::InvalidRequestUrl {
            url: request.url.clone(),
            source,
        })?;
        let no_match = || EngineError::NoMatch {
            method: request.method,
            url: request.url.clone(),
        };

        if origin_of(&url).as_deref() != Some(self.origin.as_str()) {
            tracing::warn!(origin = %self.origin, method = %request.method, url = %request.url, "request targets another origin");
            return Err(no_match());
        }

        let path = match url.query() {
            Some(q) => format!("{}?{}", url.path(), q),
            None => url.path().to_owned(),
        };
        let query = url.query().map(parse_query_string).unwrap_or_default();

        let (event, response) = {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            let persist = state.persist;
            let Some(interceptor) = state
                .interceptors
                .iter_mut()
                .find(|i| !i.is_exhausted(persist) && i.matches(request, &path, &query))
            else {
                tracing::warn!(origin = %self.origin, method = %request.method, path = %path, "no interceptor matched");
                return Err(no_match());
            };
            interceptor.counter += 1;
            tracing::debug!(id = interceptor.id, method = %request.method, path = %path, "interceptor matched");

            let event = RepliedRequest {
                interceptor_id: interceptor.id,
                method: request.method,
                path,
                query: interceptor.query.is_some().then(|| query.clone()),
                headers: Some(
                    request
                        .headers
                        .iter()
                        .map(|(k, v)| (k.to_lowercase(), ParamValue::Single(v.clone())))
                        .collect(),
                ),
                body: request.body.clone(),
            };
            (event, interceptor.response.clone())
        };

        let listeners = self.state.borrow().listeners.clone();
        for listener in &listeners {
            listener(&event);
        }

        Ok(response)
    }

    /// True once every armed interceptor has answered its expected requests.
    pub fn is_done(&self) -> bool {
        self.state
            .borrow()
            .interceptors
            .iter()
            .all(ArmedInterceptor::is_satisfied)
    }

    /// Interceptors still waiting for requests, as `METHOD origin+path`.
    pub fn pending_mocks(&self) -> Vec<String> {
        self.state
            .borrow()
            .interceptors
            .iter()
            .filter(|i| !i.is_satisfied())
            .map(|i| format!("{} {}{}", i.method, self.origin, i.path))
            .collect()
    }

    /// # Errors
    /// Returns error listing the interceptors that were never satisfied.
    pub fn done(&self) -> Result<(), EngineError> {
        let pending = self.pending_mocks();
        if pending.is_empty() {
            Ok(())
        } else {
            Err(EngineError::PendingMocks { pending })
        }
    }
}
