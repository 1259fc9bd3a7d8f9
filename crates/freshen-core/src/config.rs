//! Configuration boundary between host and backend

use std::collections::HashMap;

use serde_json::Value;

/// Opaque settings source handed to a backend exactly once at initialization
///
/// How the values were loaded is the host's business; the contract only
/// requires that backend-specific keys stay queryable after a successful
/// handshake.
pub trait ConfigProvider: Send + Sync {
    /// Look up a backend-specific key
    fn value(&self, key: &str) -> Option<Value>;

    /// Look up a key and coerce it to a string
    ///
    /// Non-string scalars are rendered to their JSON text.
    fn string(&self, key: &str) -> Option<String> {
        self.value(key).map(|value| match value {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }
}

/// In-memory [`ConfigProvider`] for tests and embedding hosts
#[derive(Debug, Clone, Default)]
pub struct MemoryConfig {
    values: HashMap<String, Value>,
}

impl MemoryConfig {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one setting
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigProvider for MemoryConfig {
    fn value(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }
}

/// Coerce an untyped value into a list of strings
///
/// A native array passes through element-wise (non-string elements are
/// rendered to their JSON text). Any other value is coerced to a string and
/// split on `separator`: literal substring match, empty segments retained, no
/// trimming or deduplication.
pub fn string_list(value: &Value, separator: &str) -> Vec<String> {
    let render = |item: &Value| match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    match value {
        Value::Array(items) => items.iter().map(render).collect(),
        other => render(other)
            .split(separator)
            .map(str::to_string)
            .collect(),
    }
}
