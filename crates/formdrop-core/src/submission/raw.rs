//! Loosely-typed submission input
//!
//! Multipart adapters and JSON callers both produce a [`RawValue`]; the validator is the
//! only place that decides whether its shape is acceptable.

use std::collections::BTreeMap;

use bytes::Bytes;

pub type RawObject = BTreeMap<String, RawValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Binary(Bytes),
    List(Vec<RawValue>),
    Object(RawObject),
}

impl RawValue {
    pub fn object() -> Self {
        RawValue::Object(RawObject::new())
    }

    /// Insert a key when `self` is an object. No-op on other variants.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        if let RawValue::Object(map) = self {
            map.insert(key.into(), value.into());
        }
    }

    /// Builder form of [`RawValue::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        match self {
            RawValue::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<u64> for RawValue {
    fn from(value: u64) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<usize> for RawValue {
    fn from(value: usize) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<Bytes> for RawValue {
    fn from(value: Bytes) -> Self {
        RawValue::Binary(value)
    }
}

impl From<Vec<u8>> for RawValue {
    fn from(value: Vec<u8>) -> Self {
        RawValue::Binary(Bytes::from(value))
    }
}

impl From<Vec<RawValue>> for RawValue {
    fn from(value: Vec<RawValue>) -> Self {
        RawValue::List(value)
    }
}

impl From<RawObject> for RawValue {
    fn from(value: RawObject) -> Self {
        RawValue::Object(value)
    }
}

/// JSON has no binary type, so byte buffers never come out of this conversion.
impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RawValue::Null,
            serde_json::Value::Bool(b) => RawValue::Bool(b),
            serde_json::Value::Number(n) => RawValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => RawValue::Text(s),
            serde_json::Value::Array(items) => {
                RawValue::List(items.into_iter().map(RawValue::from).collect())
            }
            serde_json::Value::Object(map) => RawValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, RawValue::from(v)))
                    .collect(),
            ),
        }
    }
}
