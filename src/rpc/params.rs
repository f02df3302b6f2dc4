//! Lenient accessors for loosely typed call parameters

use super::RpcError;
use serde_json::{Map, Value};

/// Trimmed text of a parameter; numbers and booleans are rendered,
/// missing or null values are empty
pub fn text(params: &Map<String, Value>, key: &str) -> String {
    match params.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
    }
}

/// A non-empty string parameter, if present
pub fn opt_text(params: &Map<String, Value>, key: &str) -> Option<String> {
    Some(text(params, key)).filter(|s| !s.is_empty())
}

/// Result count: integer or numeric string, default `default`
pub fn count(params: &Map<String, Value>, default: usize) -> Result<usize, RpcError> {
    let invalid = || RpcError::bad_request("'count' must be a non-negative integer");

    match params.get("count") {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Number(n)) => match (n.as_u64(), n.as_f64()) {
            (Some(v), _) => usize::try_from(v).map_err(|_| invalid()),
            (None, Some(f)) if f >= 0.0 && f.is_finite() => Ok(f.trunc() as usize),
            _ => Err(invalid()),
        },
        Some(Value::String(s)) => s.trim().parse().map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}

/// Field names to restrict to; `None` when absent or empty
pub fn fields(params: &Map<String, Value>) -> Option<Vec<String>> {
    let fields: Vec<String> = params
        .get("fields")?
        .as_array()?
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();
    (!fields.is_empty()).then_some(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_text() {
        let params = object(json!({"q": "  김민수  ", "n": 5, "z": null}));
        assert_eq!(text(&params, "q"), "김민수");
        assert_eq!(text(&params, "n"), "5");
        assert_eq!(text(&params, "z"), "");
        assert_eq!(text(&params, "missing"), "");
        assert_eq!(opt_text(&params, "z"), None);
    }

    #[test]
    fn test_count() {
        assert_eq!(count(&object(json!({})), 10).unwrap(), 10);
        assert_eq!(count(&object(json!({"count": 3})), 10).unwrap(), 3);
        assert_eq!(count(&object(json!({"count": " 7 "})), 10).unwrap(), 7);
        assert_eq!(count(&object(json!({"count": 4.9})), 10).unwrap(), 4);
        assert_eq!(count(&object(json!({"count": -1})), 10).unwrap_err().code, 400);
        assert_eq!(count(&object(json!({"count": "many"})), 10).unwrap_err().code, 400);
        assert_eq!(count(&object(json!({"count": [1]})), 10).unwrap_err().code, 400);
    }

    #[test]
    fn test_fields() {
        assert_eq!(
            fields(&object(json!({"fields": ["성명", 1, "부서"]}))),
            Some(vec!["성명".to_string(), "부서".to_string()])
        );
        assert_eq!(fields(&object(json!({"fields": []}))), None);
        assert_eq!(fields(&object(json!({"fields": "성명"}))), None);
        assert_eq!(fields(&object(json!({}))), None);
    }
}
