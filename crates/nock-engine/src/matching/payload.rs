//! Request body matching with object intersection and regexes.

use crate::types::matcher::BodyMatcher;
use crate::types::payload::Body;
use serde_json::Value;

/// Check if subset JSON object is contained in target JSON object.
/// Supports deep comparison of nested objects, arrays, and primitive types.
/// Returns true if subset is None, Null, or empty object (matches any target).
pub fn object_intersects(target: Option<&Value>, subset: Option<&Value>) -> bool {
    let subset = match subset {
        None | Some(Value::Null) => return true,
        Some(Value::Object(o)) if o.is_empty() => return true,
        Some(s) => s,
    };

    let target = match target {
        None | Some(Value::Null) => return false,
        Some(t) => t,
    };

    value_intersects(target, subset)
}

fn value_intersects(target: &Value, subset: &Value) -> bool {
    match (target, subset) {
        (Value::Object(t), Value::Object(s)) => s
            .iter()
            .all(|(k, sv)| t.get(k).is_some_and(|tv| value_intersects(tv, sv))),
        (Value::Array(t), Value::Array(s)) => s
            .iter()
            .all(|sv| t.iter().any(|tv| value_intersects(tv, sv))),
        _ => target == subset,
    }
}

/// Match a request body against an optional matcher.
///
/// A matcher never matches a missing body. Value matchers need a JSON view
/// of the body and regex matchers a text view.
pub fn payload_matches(expected: Option<&BodyMatcher>, body: Option<&Body>) -> bool {
    let Some(expected) = expected else {
        return true;
    };
    let Some(body) = body else {
        return false;
    };
    match expected {
        BodyMatcher::Value(subset) => body
            .as_json()
            .is_some_and(|actual| object_intersects(Some(&*actual), Some(subset))),
        BodyMatcher::Regex(regex) => body.as_text().is_some_and(|text| regex.is_match(&text)),
    }
}
