//! Errors raised by scopes and interceptors.

use crate::types::route::HttpMethod;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Base URL '{url}' has no host")]
    MissingHost { url: String },

    #[error("Invalid request URL '{url}': {source}")]
    InvalidRequestUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// No armed interceptor on the scope matched the request.
    #[error("No match for request {method} {url}")]
    NoMatch { method: HttpMethod, url: String },

    #[error("Mocks not yet satisfied: {}", pending.join(", "))]
    PendingMocks { pending: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::error::Error;

    #[rstest]
    fn test_invalid_base_url_display_and_source() {
        let source = url::Url::parse("not a url").unwrap_err();
        let error = EngineError::InvalidBaseUrl {
            url: "not a url".into(),
            source,
        };
        let display = error.to_string();
        assert!(display.contains("not a url"));
        assert!(display.contains("relative URL without a base"));
        assert!(error.source().is_some());
    }

    #[rstest]
    fn test_pending_mocks_lists_routes() {
        let error = EngineError::PendingMocks {
            pending: vec!["GET https://a.test/x".into(), "POST https://a.test/y".into()],
        };
        assert_eq!(
            error.to_string(),
            "Mocks not yet satisfied: GET https://a.test/x, POST https://a.test/y"
        );
    }

    #[rstest]
    fn test_no_match_display() {
        let error = EngineError::NoMatch {
            method: HttpMethod::Delete,
            url: "https://a.test/users/1".into(),
        };
        assert_eq!(
            error.to_string(),
            "No match for request DELETE https://a.test/users/1"
        );
    }
}
