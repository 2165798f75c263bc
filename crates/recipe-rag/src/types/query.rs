//! Chat request and filter types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request body for POST /api/chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The question to answer
    pub query: String,

    /// Stream the response (default: true)
    #[serde(default = "default_stream")]
    pub stream: bool,
}

fn default_stream() -> bool {
    true
}

impl ChatRequest {
    /// Create a new streaming request
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            stream: true,
        }
    }
}

/// Structured constraints extracted from a query.
///
/// Maps attribute names (`category`, `difficulty`) to the accepted value.
/// The empty set is a normal outcome and means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(BTreeMap<String, String>);

impl FilterSet {
    /// Create an empty filter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constraint
    pub fn insert(&mut self, attribute: impl Into<String>, value: impl Into<String>) {
        self.0.insert(attribute.into(), value.into());
    }

    /// Look up a constraint value
    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.0.get(attribute).map(String::as_str)
    }

    /// True when no constraint was extracted
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of constraints
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over (attribute, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
