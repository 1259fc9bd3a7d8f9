//! Core data entities exchanged between host and backend

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One available update as discovered by a backend
///
/// Treated as immutable once handed to the host. `version` carries whatever
/// ordering scheme the producing backend uses; no universal ordering is
/// imposed on it here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateInfo {
    /// Display name of the component the update applies to
    pub name: String,
    /// Version string in the backend's own scheme
    pub version: String,
    /// Backend-defined extra payload, keyed by string
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub data: HashMap<String, Value>,
}

impl UpdateInfo {
    /// Create an update entry with an empty data payload
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            data: HashMap::new(),
        }
    }

    /// Attach one data entry
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// Identifies one [`UpdateInfo::data`] entry suitable for display as a
/// secondary column
///
/// `label` is the human-readable column header; a backend that offers no
/// secondary info returns `None` from `secondary_info` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryInfo {
    /// Key into the update's data payload
    pub key: String,
    /// Localized column label
    pub label: String,
}

impl SecondaryInfo {
    /// Create a new secondary-info descriptor
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}
