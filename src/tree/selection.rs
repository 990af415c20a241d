//! Selection engine: activation, propagation, expand/collapse.

use log::debug;

use super::lazy::PendingLoad;
use super::node::{NodeId, SelectionState, Visibility};
use super::store::Tree;
use crate::config::TreeConfig;
use crate::error::TreeResult;

/// What a gesture changed.
#[derive(Debug, Default)]
pub struct Outcome {
    /// Nodes whose own presentation changed. Their paths to the root changed
    /// too; see [`Tree::affected`].
    pub changed: Vec<NodeId>,
    /// Load started by an expansion, to be settled and handed back to
    /// [`Tree::finish_load`]
    pub pending: Option<PendingLoad>,
}

impl Outcome {
    pub(crate) fn changed(changed: Vec<NodeId>) -> Self {
        Self {
            changed,
            pending: None,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.changed.is_empty() && self.pending.is_none()
    }
}

/// Which children a propagation walks into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reach {
    /// Skip children hidden by a search
    Visible,
    /// Hidden children too
    Everything,
}

impl Tree {
    /// Click on a node's checkbox.
    ///
    /// A node that is not selectable is expanded instead. With `isolate`, or
    /// in single-selection mode on an unselected node, everything else is
    /// deselected and the node becomes the only, collapsed, selection.
    /// Otherwise the node's effective state is toggled through its visible
    /// subtree.
    pub fn handle_activate(
        &mut self,
        id: NodeId,
        config: &TreeConfig,
        isolate: bool,
    ) -> TreeResult<Outcome> {
        self.node(id)?;
        if !self.is_selectable(id, config) {
            debug!("node {id} is not selectable; activating expands it");
            return self.handle_expand(id, config);
        }

        let unchecked = self.selection_state(id, config) == SelectionState::Unchecked;
        if isolate || (!config.select_multiple() && unchecked) {
            let before = self.node(id)?;
            let before = (before.active, before.expanded);
            let root = self.root_of(id);
            let mut changed = self.set_state_for_all(root, false, config, Reach::Everything);
            changed.extend(self.set_expanded(id, false, config)?);
            self.set_active(id, true)?;
            // The target may have been switched off on the way.
            changed.retain(|&n| n != id);
            let after = self.node(id)?;
            if (after.active, after.expanded) != before {
                changed.push(id);
            }
            Ok(Outcome::changed(changed))
        } else {
            let changed = self.set_state_for_all(id, unchecked, config, Reach::Visible);
            Ok(Outcome::changed(changed))
        }
    }

    /// Click on a node's expander.
    ///
    /// Expanding hands the node's own selection to its children; collapsing
    /// folds the children back into one flag (indeterminate folds to off).
    /// Expanding an unloaded node starts a load and returns it as pending;
    /// without a loader the node becomes an empty leaf at once.
    pub fn handle_expand(&mut self, id: NodeId, config: &TreeConfig) -> TreeResult<Outcome> {
        let node = self.node(id)?;
        if !self.is_expandable(id, config) {
            debug!("node {id} is not expandable; ignoring");
            return Ok(Outcome::default());
        }

        let initial_active = node.active;
        let expanding = !node.expanded;
        let mut changed = self.set_expanded(id, expanding, config)?;

        let mut pending = None;
        if expanding && !self.node(id)?.is_loaded() {
            pending = self.begin_load(id, initial_active, config)?;
            if pending.is_none() {
                changed.extend(self.set_state_for_all(
                    id,
                    initial_active,
                    config,
                    Reach::Everything,
                ));
            }
        }

        // The expander itself always flips.
        if !changed.contains(&id) {
            changed.insert(0, id);
        }
        Ok(Outcome { changed, pending })
    }

    /// Everything a renderer must refresh after a gesture on `id`: the
    /// changed nodes plus the path from `id` to the root.
    pub fn affected(&self, id: NodeId, changed: &[NodeId]) -> Vec<NodeId> {
        let mut out = changed.to_vec();
        for node in self.path_to_root(id) {
            if !out.contains(&node) {
                out.push(node);
            }
        }
        out
    }

    /// Set `active` on `id` or, through expanded nodes, on its descendants.
    /// Unselectable nodes keep their flag but are walked. Returns the nodes
    /// whose flag changed.
    pub(crate) fn set_state_for_all(
        &mut self,
        id: NodeId,
        active: bool,
        config: &TreeConfig,
        reach: Reach,
    ) -> Vec<NodeId> {
        let mut changed = Vec::new();
        self.propagate(id, active, config, reach, &mut changed);
        changed
    }

    fn propagate(
        &mut self,
        id: NodeId,
        active: bool,
        config: &TreeConfig,
        reach: Reach,
        changed: &mut Vec<NodeId>,
    ) {
        let Some(node) = self.get(id) else {
            return;
        };
        match node.shown_children() {
            Some(children) => {
                for child in children {
                    let hidden = self
                        .get(child)
                        .is_some_and(|c| c.visibility == Visibility::Invisible);
                    if reach == Reach::Visible && hidden {
                        continue;
                    }
                    self.propagate(child, active, config, reach, changed);
                }
            }
            None => {
                if self.is_selectable(id, config) && self.set_active(id, active).unwrap_or(false) {
                    changed.push(id);
                }
            }
        }
    }

    /// Change expansion and move selection ownership accordingly.
    pub(crate) fn set_expanded(
        &mut self,
        id: NodeId,
        expanded: bool,
        config: &TreeConfig,
    ) -> TreeResult<Vec<NodeId>> {
        let node = self.node(id)?;
        if node.search_collapsed {
            if expanded {
                // Reopen as it was; the children still hold the selection.
                let node = self.node_mut(id)?;
                node.expanded = true;
                node.search_collapsed = false;
                self.touch(id);
                return Ok(Vec::new());
            }
        } else if node.expanded == expanded {
            return Ok(Vec::new());
        }

        if expanded {
            let active = node.active;
            self.node_mut(id)?.expanded = true;
            self.touch(id);
            // Unloaded children get the flag once the load settles.
            let mut changed = Vec::new();
            if self.node(id)?.shown_children().is_some() {
                changed = self.set_state_for_all(id, active, config, Reach::Everything);
            }
            self.set_active(id, false)?;
            Ok(changed)
        } else {
            let folded = self.selection_state(id, config) == SelectionState::Checked;
            let node = self.node_mut(id)?;
            node.expanded = false;
            node.search_collapsed = false;
            self.touch(id);
            self.set_active(id, folded)?;
            Ok(Vec::new())
        }
    }

    /// Returns whether the flag changed.
    pub(crate) fn set_active(&mut self, id: NodeId, active: bool) -> TreeResult<bool> {
        let node = self.node_mut(id)?;
        if node.active == active {
            return Ok(false);
        }
        node.active = active;
        self.touch(id);
        Ok(true)
    }
}
