//! Request DTOs for the gated cache API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::key::Key;

/// A key as it appears in a JSON body.
///
/// Strings become text keys, integers become `i64` (or `u64` above
/// `i64::MAX`), other numbers become `f64`. Booleans, null, arrays and
/// objects map to an unsupported key and are rejected by the gate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct KeyParam(pub Key);

impl From<Value> for KeyParam {
    fn from(value: Value) -> Self {
        let key = match value {
            Value::String(text) => Key::Text(text),
            Value::Number(number) => {
                if let Some(v) = number.as_i64() {
                    Key::I64(v)
                } else if let Some(v) = number.as_u64() {
                    Key::U64(v)
                } else if let Some(v) = number.as_f64() {
                    Key::F64(v)
                } else {
                    Key::unsupported("number")
                }
            }
            Value::Bool(_) => Key::unsupported("bool"),
            Value::Null => Key::unsupported("null"),
            Value::Array(_) => Key::unsupported("array"),
            Value::Object(_) => Key::unsupported("object"),
        };
        KeyParam(key)
    }
}

impl KeyParam {
    /// Unwraps the parsed key.
    pub fn into_key(self) -> Key {
        self.0
    }
}

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key, any JSON scalar
/// - `value`: The value to store
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: KeyParam,
    /// The value to store
    pub value: String,
}

/// Request body for a typed lookup (POST /get)
#[derive(Debug, Clone, Deserialize)]
pub struct GetRequest {
    /// The cache key, any JSON scalar
    pub key: KeyParam,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"key": "test", "value": "hello"}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key.into_key(), Key::from("test"));
        assert_eq!(req.value, "hello");
    }

    #[test]
    fn test_numeric_keys() {
        let req: GetRequest = serde_json::from_str(r#"{"key": 42}"#).unwrap();
        assert_eq!(req.key.0, Key::I64(42));

        let req: GetRequest = serde_json::from_str(r#"{"key": -3}"#).unwrap();
        assert_eq!(req.key.0, Key::I64(-3));

        let req: GetRequest = serde_json::from_str(r#"{"key": 18446744073709551615}"#).unwrap();
        assert_eq!(req.key.0, Key::U64(u64::MAX));

        let req: GetRequest = serde_json::from_str(r#"{"key": 3.5}"#).unwrap();
        assert_eq!(req.key.0, Key::F64(3.5));
    }

    #[test]
    fn test_non_scalar_keys_are_unsupported() {
        for (json, name) in [
            (r#"{"key": true}"#, "bool"),
            (r#"{"key": null}"#, "null"),
            (r#"{"key": [1, 2]}"#, "array"),
            (r#"{"key": {"a": 1}}"#, "object"),
        ] {
            let req: GetRequest = serde_json::from_str(json).unwrap();
            assert_eq!(req.key.0, Key::unsupported(name));
        }
    }

    #[test]
    fn test_missing_value_rejected() {
        let result: Result<SetRequest, _> = serde_json::from_str(r#"{"key": "k"}"#);
        assert!(result.is_err());
    }
}
