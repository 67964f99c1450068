//! Stored attribute values.

use serde::{Deserialize, Serialize};

/// The stored shape of one attribute.
///
/// Serialized untagged so that `"hair": "white"` and `"hair": ["white", "grey"]`
/// both load and re-save exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    List(Vec<String>),
}

impl Default for AttributeValue {
    fn default() -> Self {
        AttributeValue::Text(String::new())
    }
}

impl AttributeValue {
    /// An empty list value.
    pub fn empty_list() -> Self {
        AttributeValue::List(Vec::new())
    }

    /// True when no non-empty value is stored.
    pub fn is_unknown(&self) -> bool {
        match self {
            AttributeValue::Text(s) => s.is_empty(),
            AttributeValue::List(items) => items.iter().all(|s| s.is_empty()),
        }
    }

    /// Human-readable rendering used in summaries.
    pub fn display(&self) -> String {
        match self {
            AttributeValue::Text(s) => s.clone(),
            AttributeValue::List(items) => items.join(", "),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(values: Vec<String>) -> Self {
        AttributeValue::List(values)
    }
}
