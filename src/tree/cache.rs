//! Derived node values: tri-state selection, selectability, expandability
//! and the flattened selected list.
//!
//! Each value is computed on first read and kept in the node's cache until
//! something it depends on changes. Internal mutations invalidate the path
//! to the root themselves; `dirty` is for changes the tree cannot see (a
//! policy whose answer depends on outside state).

use super::node::{Cached, NodeId, SelectionState, Visibility};
use super::store::Tree;
use crate::config::TreeConfig;

impl Tree {
    /// Tri-state selection summary of `id`.
    ///
    /// An active node is checked. An expanded node with loaded children (or
    /// a branch a search collapsed) aggregates over its children that are visible and selectable: all of
    /// them not unchecked gives checked, none gives unchecked, anything in
    /// between indeterminate. Anything else is unchecked.
    pub fn selection_state(&self, id: NodeId, config: &TreeConfig) -> SelectionState {
        let Some(node) = self.get(id) else {
            return SelectionState::Unchecked;
        };
        if let Some(state) = node.cache.selection.get().value() {
            return state;
        }

        let state = if node.active {
            SelectionState::Checked
        } else if let Some(children) = node.shown_children() {
            let mut eligible = 0usize;
            let mut selected = 0usize;
            for child in children {
                let Some(c) = self.get(child) else {
                    continue;
                };
                if c.visibility == Visibility::Invisible || !self.is_selectable(child, config) {
                    continue;
                }
                eligible += 1;
                if self.selection_state(child, config) != SelectionState::Unchecked {
                    selected += 1;
                }
            }
            if selected == 0 {
                SelectionState::Unchecked
            } else if selected == eligible {
                SelectionState::Checked
            } else {
                SelectionState::Indeterminate
            }
        } else {
            SelectionState::Unchecked
        };

        node.cache.selection.set(Cached::Valid(state));
        state
    }

    pub fn is_selectable(&self, id: NodeId, config: &TreeConfig) -> bool {
        let Some(node_ref) = self.node_ref(id) else {
            return false;
        };
        if let Some(selectable) = node_ref.cache.selectable.get().value() {
            return selectable;
        }
        let selectable = config.allows_select(node_ref);
        node_ref.cache.selectable.set(Cached::Valid(selectable));
        selectable
    }

    /// Unloaded nodes are expandable (a load will tell); loaded ones only
    /// when they have children. The policy gets the final word.
    pub fn is_expandable(&self, id: NodeId, config: &TreeConfig) -> bool {
        let Some(node_ref) = self.node_ref(id) else {
            return false;
        };
        if let Some(expandable) = node_ref.cache.expandable.get().value() {
            return expandable;
        }
        let has_room = node_ref.children.as_ref().map_or(true, |c| !c.is_empty());
        let expandable = has_room && config.allows_expand(node_ref);
        node_ref.cache.expandable.set(Cached::Valid(expandable));
        expandable
    }

    /// Nodes whose own flag currently carries selection under `id`: the node
    /// itself if active, otherwise the selected nodes of its expanded
    /// children. Hidden branches keep their selection and are included, also
    /// when a search collapsed them.
    pub fn selected_nodes(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.get(id) else {
            return Vec::new();
        };
        if let Cached::Valid(selected) = &*node.cache.selected.borrow() {
            return selected.clone();
        }

        let selected = if node.active {
            vec![id]
        } else if let Some(children) = node.shown_children() {
            children
                .into_iter()
                .flat_map(|child| self.selected_nodes(child))
                .collect()
        } else {
            Vec::new()
        };

        node.cache.selected.replace(Cached::Valid(selected.clone()));
        selected
    }

    /// Keys of [`Tree::selected_nodes`]
    pub fn selected_keys(&self, id: NodeId) -> Vec<super::NodeKey> {
        self.selected_nodes(id)
            .into_iter()
            .filter_map(|n| self.get(n).map(|node| node.key.clone()))
            .collect()
    }

    /// Mark every cached value of `id` stale
    pub fn dirty(&self, id: NodeId) {
        if let Some(node) = self.get(id) {
            node.cache.clear();
        }
    }

    /// [`Tree::dirty`] for `id` and everything loaded below it
    pub fn dirty_subtree(&self, id: NodeId) {
        for node in self.descendants(id) {
            self.dirty(node);
        }
    }
}
