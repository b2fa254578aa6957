//! Headers matching with case-insensitive names.

use crate::types::matcher::HeadersMatcher;
use std::collections::HashMap;

fn normalize_headers(headers: &HashMap<String, String>) -> HashMap<String, &str> {
    headers
        .iter()
        .map(|(k, v)| (k.to_lowercase(), v.as_str()))
        .collect()
}

/// Check that every expected header is present in `target` with the same value.
pub fn headers_intersects(
    target: &HashMap<String, String>,
    subset: &HashMap<String, String>,
) -> bool {
    if subset.is_empty() {
        return true;
    }
    let target = normalize_headers(target);
    normalize_headers(subset)
        .iter()
        .all(|(k, v)| target.get(k) == Some(v))
}

/// Match headers against an optional matcher. No matcher matches any headers.
pub fn headers_matches(expected: Option<&HeadersMatcher>, actual: &HashMap<String, String>) -> bool {
    match expected {
        None => true,
        Some(HeadersMatcher(expected_map)) => headers_intersects(actual, expected_map),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn h(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).into(), (*v).into()))
            .collect()
    }

    #[rstest]
    #[case(h(&[]), h(&[]), true)]
    #[case(h(&[("Content-Type", "application/json")]), h(&[]), true)]
    #[case(h(&[("Content-Type", "application/json"), ("Auth", "Bearer x")]), h(&[("content-type", "application/json")]), true)]
    #[case(h(&[("Content-Type", "application/json")]), h(&[("Content-Type", "text/plain")]), false)]
    #[case(h(&[]), h(&[("Content-Type", "application/json")]), false)]
    #[case(h(&[("Accept", "text/html")]), h(&[("Content-Type", "application/json")]), false)]
    fn test_headers_intersects(
        #[case] target: HashMap<String, String>,
        #[case] subset: HashMap<String, String>,
        #[case] expected: bool,
    ) {
        assert_eq!(headers_intersects(&target, &subset), expected);
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(HeadersMatcher::map([("authorization", "Bearer t")])), true)]
    #[case(Some(HeadersMatcher::map([("authorization", "Bearer other")])), false)]
    #[case(Some(HeadersMatcher::map([("X-API-KEY", "k1"), ("authorization", "Bearer t")])), true)]
    #[case(Some(HeadersMatcher::map([("x-missing", "1")])), false)]
    fn test_headers_matches(#[case] expected: Option<HeadersMatcher>, #[case] result: bool) {
        let actual = h(&[("Authorization", "Bearer t"), ("X-Api-Key", "k1")]);
        assert_eq!(headers_matches(expected.as_ref(), &actual), result);
    }
}
