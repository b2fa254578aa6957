//! Path matching for literal and regex interceptor paths.

use crate::types::route::PathPattern;

/// Split `/path?query` into its path and optional query string.
pub fn split_path(path_and_query: &str) -> (&str, Option<&str>) {
    match path_and_query.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (path_and_query, None),
    }
}

/// Check whether an observed `path_and_query` satisfies an interceptor path.
///
/// Literals ignore a trailing slash. A literal without `?` ignores the query
/// string (query matchers decide on it); a literal with `?` must match it too.
/// Regexes are tested against the path alone.
pub fn path_matches(pattern: &PathPattern, path_and_query: &str) -> bool {
    let (path, query) = split_path(path_and_query);
    match pattern {
        PathPattern::Literal(literal) => {
            let (expected_path, expected_query) = split_path(literal);
            if normalize_path(expected_path) != normalize_path(path) {
                return false;
            }
            match expected_query {
                Some(expected) => query == Some(expected),
                None => true,
            }
        }
        PathPattern::Regex(regex) => regex.is_match(path),
    }
}

fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}
