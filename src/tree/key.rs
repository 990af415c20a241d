//! Node identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable, user-facing identity of a node.
///
/// Keys are unique among siblings and are what equality and child lookup
/// use. They survive cloning and reloading, unlike arena handles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeKey {
    Int(i64),
    Str(String),
}

impl NodeKey {
    /// Parse a key typed on a command line: integers become `Int`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(n) => NodeKey::Int(n),
            Err(_) => NodeKey::Str(raw.to_string()),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Int(n) => write!(f, "{n}"),
            NodeKey::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NodeKey {
    fn from(value: i64) -> Self {
        NodeKey::Int(value)
    }
}

impl From<i32> for NodeKey {
    fn from(value: i32) -> Self {
        NodeKey::Int(i64::from(value))
    }
}

impl From<u32> for NodeKey {
    fn from(value: u32) -> Self {
        NodeKey::Int(i64::from(value))
    }
}

impl From<&str> for NodeKey {
    fn from(value: &str) -> Self {
        NodeKey::Str(value.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(value: String) -> Self {
        NodeKey::Str(value)
    }
}
