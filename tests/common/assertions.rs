//! Assertion utilities for testing.
//!
//! This module provides helper functions for checking the JSON shapes the
//! surfsup endpoints return.

use serde_json::Value;

/// Keys of every temperature aggregate response
pub const AGGREGATE_KEYS: [&str; 3] = ["avg_temperature", "max_temperature", "min_temperature"];

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that a JSON value is a number approximately equal to `expected`.
pub fn assert_json_approx_eq(actual: &Value, expected: f64) {
    let number = actual
        .as_f64()
        .unwrap_or_else(|| panic!("Expected a number, got {}", actual));
    let diff = (number - expected).abs();

    assert!(
        diff <= DEFAULT_EPSILON,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}",
        number,
        expected,
        diff
    );
}

/// Assert that a JSON value is an aggregate object with exactly the three temperature keys.
pub fn assert_aggregate_shape(json: &Value) {
    let object = json
        .as_object()
        .unwrap_or_else(|| panic!("Expected an object, got {}", json));
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();

    assert_eq!(keys, AGGREGATE_KEYS, "Unexpected aggregate keys");
}

/// Assert that every field of an aggregate response is null.
pub fn assert_aggregate_is_null(json: &Value) {
    assert_aggregate_shape(json);
    for key in AGGREGATE_KEYS {
        assert!(json[key].is_null(), "{} should be null, got {}", key, json[key]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assert_json_approx_eq() {
        assert_json_approx_eq(&json!(76.5), 76.5);
        assert_json_approx_eq(&json!(70), 70.0);
    }

    #[test]
    fn test_assert_aggregate_is_null() {
        assert_aggregate_is_null(&json!({
            "min_temperature": null,
            "avg_temperature": null,
            "max_temperature": null,
        }));
    }
}
