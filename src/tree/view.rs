//! Read-only views for renderers: display order, flattened rows and the
//! JSON export.

use serde::Serialize;

use super::key::NodeKey;
use super::node::{ExpandPhase, NodeId, SelectionState, Visibility};
use super::store::Tree;
use crate::config::TreeConfig;
use crate::error::TreeResult;

/// A flattened representation of a node for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub node: NodeId,
    /// Depth level (0 = first displayed level)
    pub depth: usize,
    pub key: NodeKey,
    pub name: String,
    pub state: SelectionState,
    pub expanded: bool,
    pub expandable: bool,
    /// Expanded but children not loaded yet
    pub loading: bool,
    /// Matched the active search
    pub relevant: bool,
    pub selectable: bool,
}

/// Export form of a node. Never carries the parent link.
#[derive(Debug, Serialize)]
pub struct NodeExport<'a> {
    pub id: &'a NodeKey,
    pub name: &'a str,
    pub active: bool,
    pub expanded: bool,
    pub visibility: Visibility,
    pub selection: SelectionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeExport<'a>>>,
}

impl Tree {
    /// Children of `id` as they are displayed: loaded, not hidden by a
    /// search, kept by `filter` and ordered by `sort`. Storage order is left
    /// alone.
    pub fn display_children(&self, id: NodeId, config: &TreeConfig) -> Vec<NodeId> {
        let mut shown: Vec<NodeId> = self
            .children_of(id)
            .into_iter()
            .filter(|&c| {
                self.node_ref(c).is_some_and(|node| {
                    node.visibility != Visibility::Invisible && config.shows(node)
                })
            })
            .collect();
        shown.sort_by(|&a, &b| match (self.node_ref(a), self.node_ref(b)) {
            (Some(a), Some(b)) => config.compare(a, b),
            _ => std::cmp::Ordering::Equal,
        });
        shown
    }

    /// Depth-first rows of everything currently displayed.
    ///
    /// Without `show_root` the root's children form the first level, and
    /// only while the root is expanded.
    pub fn rows(&self, config: &TreeConfig) -> Vec<Row> {
        let mut rows = Vec::new();
        if config.show_root() {
            self.flatten(self.root(), 0, config, &mut rows);
        } else if self.get(self.root()).is_some_and(|n| n.expanded) {
            for child in self.display_children(self.root(), config) {
                self.flatten(child, 0, config, &mut rows);
            }
        }
        rows
    }

    fn flatten(&self, id: NodeId, depth: usize, config: &TreeConfig, rows: &mut Vec<Row>) {
        let Some(node) = self.get(id) else {
            return;
        };
        if node.visibility == Visibility::Invisible {
            return;
        }
        rows.push(Row {
            node: id,
            depth,
            key: node.key.clone(),
            name: node.name.clone(),
            state: self.selection_state(id, config),
            expanded: node.expanded,
            expandable: self.is_expandable(id, config),
            loading: node.phase() == ExpandPhase::Expanding,
            relevant: node.visibility == Visibility::Relevant,
            selectable: self.is_selectable(id, config),
        });
        if node.expanded {
            for child in self.display_children(id, config) {
                self.flatten(child, depth + 1, config, rows);
            }
        }
    }

    /// Export the loaded subtree of `id`, hidden nodes included
    pub fn export(&self, id: NodeId, config: &TreeConfig) -> TreeResult<NodeExport<'_>> {
        let node = self.node(id)?;
        let children = match &node.children {
            Some(children) => Some(
                children
                    .values()
                    .map(|&c| self.export(c, config))
                    .collect::<TreeResult<Vec<_>>>()?,
            ),
            None => None,
        };
        Ok(NodeExport {
            id: &node.key,
            name: &node.name,
            active: node.active,
            expanded: node.expanded,
            visibility: node.visibility,
            selection: self.selection_state(id, config),
            children,
        })
    }

    /// Pretty JSON of [`Tree::export`]
    pub fn to_json(&self, id: NodeId, config: &TreeConfig) -> TreeResult<String> {
        Ok(serde_json::to_string_pretty(&self.export(id, config)?)?)
    }
}
