//! Owned, parent-free node descriptions.
//!
//! Seeds are what crosses the boundary between the tree and the outside
//! world: lazy loaders and remote search return them, `clone_node` produces
//! them, and a whole tree can be read from a JSON seed.

use serde::{Deserialize, Serialize};

use super::key::NodeKey;
use crate::error::TreeResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSeed {
    pub id: NodeKey,
    pub name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub expanded: bool,
    /// `None` leaves the node unloaded (a lazy loader will be asked later)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeSeed>>,
}

impl NodeSeed {
    /// Create an unloaded node
    pub fn new(id: impl Into<NodeKey>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            active: false,
            expanded: false,
            children: None,
        }
    }

    /// Create a node known to have no children
    pub fn leaf(id: impl Into<NodeKey>, name: impl Into<String>) -> Self {
        Self {
            children: Some(Vec::new()),
            ..Self::new(id, name)
        }
    }

    pub fn with_children(mut self, children: Vec<NodeSeed>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Number of nodes in this seed, itself included
    pub fn count(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(NodeSeed::count)
            .sum::<usize>()
    }

    pub fn from_json(content: &str) -> TreeResult<Self> {
        Ok(serde_json::from_str(content)?)
    }
}
