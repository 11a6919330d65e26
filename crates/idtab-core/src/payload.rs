//! # Signed Payload Reader
//!
//! A chain link's payload is semi-structured JSON. The classifier needs to
//! pull a handful of fields out of it by path (`body.track.basics.username`)
//! and to tell an absent sub-object from a present one.
//!
//! `Field` is a cursor that remembers the dotted path it was reached by, so
//! a failed read reports exactly which field was missing or mistyped.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PayloadError;

/// The JSON body of a signed statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Value);

impl Payload {
    /// Wrap a parsed JSON value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Cursor at a top-level key.
    pub fn at_key(&self, key: &str) -> Field<'_> {
        Field::root(&self.0).at_key(key)
    }

    /// Cursor at a dotted path from the root.
    pub fn at_path(&self, path: &str) -> Field<'_> {
        Field::root(&self.0).at_path(path)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A position inside a payload, possibly pointing at nothing.
#[derive(Debug, Clone)]
pub struct Field<'a> {
    path: String,
    value: Option<&'a Value>,
}

impl<'a> Field<'a> {
    fn root(value: &'a Value) -> Self {
        Self {
            path: String::new(),
            value: Some(value),
        }
    }

    /// Descend into an object key. Descending from nothing yields nothing.
    pub fn at_key(&self, key: &str) -> Field<'a> {
        let path = if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        };
        Field {
            path,
            value: self.value.and_then(|v| v.get(key)),
        }
    }

    /// Descend along a dotted path.
    pub fn at_path(&self, path: &str) -> Field<'a> {
        path.split('.')
            .filter(|k| !k.is_empty())
            .fold(self.clone(), |f, k| f.at_key(k))
    }

    /// The dotted path this cursor was reached by.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// True when the field is absent or JSON `null`.
    pub fn is_nil(&self) -> bool {
        matches!(self.value, None | Some(Value::Null))
    }

    /// Read the field as a string.
    pub fn as_str(&self) -> Result<&'a str, PayloadError> {
        match self.value {
            None | Some(Value::Null) => Err(self.missing()),
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(_) => Err(self.wrong_type("string")),
        }
    }

    /// Read the field as an array.
    pub fn as_array(&self) -> Result<&'a [Value], PayloadError> {
        match self.value {
            None | Some(Value::Null) => Err(self.missing()),
            Some(Value::Array(a)) => Ok(a.as_slice()),
            Some(_) => Err(self.wrong_type("array")),
        }
    }

    /// Compact JSON rendering of the field, for warning messages.
    pub fn to_debug_string(&self) -> String {
        match self.value {
            Some(v) => v.to_string(),
            None => "null".to_string(),
        }
    }

    fn missing(&self) -> PayloadError {
        PayloadError::Missing {
            path: self.path.clone(),
        }
    }

    fn wrong_type(&self, expected: &'static str) -> PayloadError {
        PayloadError::WrongType {
            path: self.path.clone(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Payload {
        Payload::new(json!({
            "body": {
                "type": "track",
                "track": { "basics": { "username": "alice" } },
                "service": null,
                "count": 3
            }
        }))
    }

    #[test]
    fn test_at_path_reads_nested_string() {
        let p = sample();
        assert_eq!(p.at_path("body.track.basics.username").as_str().unwrap(), "alice");
    }

    #[test]
    fn test_at_key_chains_like_at_path() {
        let p = sample();
        let f = p.at_key("body").at_key("type");
        assert_eq!(f.path(), "body.type");
        assert_eq!(f.as_str().unwrap(), "track");
    }

    #[test]
    fn test_missing_field_names_path() {
        let p = sample();
        let err = p.at_path("body.untrack.basics.username").as_str().unwrap_err();
        assert_eq!(
            err,
            PayloadError::Missing {
                path: "body.untrack.basics.username".to_string()
            }
        );
    }

    #[test]
    fn test_wrong_type() {
        let p = sample();
        let err = p.at_path("body.count").as_str().unwrap_err();
        assert!(matches!(err, PayloadError::WrongType { expected: "string", .. }));
    }

    #[test]
    fn test_is_nil() {
        let p = sample();
        assert!(p.at_path("body.service").is_nil());
        assert!(p.at_path("body.nothing.here").is_nil());
        assert!(!p.at_path("body.track").is_nil());
    }

    #[test]
    fn test_null_string_is_missing() {
        let p = sample();
        assert!(matches!(
            p.at_path("body.service").as_str(),
            Err(PayloadError::Missing { .. })
        ));
    }
}
