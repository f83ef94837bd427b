use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Open-ended value for debug bags, per-LOB sub-fields and profile metadata.
///
/// Serialized transparently as the matching JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True if any map key or text value (at any depth) contains `needle`,
    /// compared case-insensitively with underscores read as spaces.
    pub fn mentions(&self, needle: &str) -> bool {
        let needle = normalize(needle);
        self.mentions_normalized(&needle)
    }

    fn mentions_normalized(&self, needle: &str) -> bool {
        match self {
            Self::Text(s) => normalize(s).contains(needle),
            Self::List(items) => items.iter().any(|v| v.mentions_normalized(needle)),
            Self::Map(map) => map
                .iter()
                .any(|(k, v)| normalize(k).contains(needle) || v.mentions_normalized(needle)),
            Self::Null | Self::Bool(_) | Self::Number(_) => false,
        }
    }
}

fn normalize(s: &str) -> String {
    s.to_lowercase().replace('_', " ")
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}
