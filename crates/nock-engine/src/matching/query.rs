//! Query string parsing and query matchers.

use crate::types::matcher::QueryMatcher;
use crate::types::payload::ParamValue;
use std::collections::HashMap;

/// Parse a query string into a map, URL-decoding keys and values.
///
/// Repeated keys collapse into a list in order of appearance.
pub fn parse_query_string(query_str: &str) -> HashMap<String, ParamValue> {
    let mut result: HashMap<String, ParamValue> = HashMap::new();

    for pair in query_str.split('&').filter(|p| !p.is_empty()) {
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode(raw_key);
        let value = decode(raw_value);

        match result.get_mut(&key) {
            Some(existing) => existing.push(value),
            None => {
                result.insert(key, ParamValue::Single(value));
            }
        }
    }

    result
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

/// Match query parameters against a matcher. No matcher matches any query.
pub fn query_matches(expected: Option<&QueryMatcher>, actual: &HashMap<String, ParamValue>) -> bool {
    match expected {
        None | Some(QueryMatcher::Any) => true,
        Some(QueryMatcher::Map(expected_map)) => expected_map
            .iter()
            .all(|(k, v)| actual.get(k).is_some_and(|av| av.contains_all(v))),
    }
}
