//! Lazy loading of children.
//!
//! Expanding an unloaded node starts its loader and hands back a
//! [`PendingLoad`]. The embedder awaits it (applying its own timeout if it
//! wants one) and returns the [`SettledLoad`] to [`Tree::finish_load`],
//! which merges the children and reports what to refresh.

use std::fmt;

use futures::future::BoxFuture;
use log::{debug, warn};

use super::node::NodeId;
use super::selection::Reach;
use super::store::Tree;
use crate::config::{LoadResult, TreeConfig};
use crate::error::{TreeError, TreeResult};

/// A load in flight for one node. Resolves exactly once.
#[must_use = "a pending load does nothing unless settled and finished"]
pub struct PendingLoad {
    node: NodeId,
    initial_active: bool,
    future: BoxFuture<'static, LoadResult>,
}

impl PendingLoad {
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Wait for the loader
    pub async fn settle(self) -> SettledLoad {
        let result = self.future.await;
        SettledLoad {
            node: self.node,
            initial_active: self.initial_active,
            result,
        }
    }
}

impl fmt::Debug for PendingLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingLoad")
            .field("node", &self.node)
            .field("initial_active", &self.initial_active)
            .finish_non_exhaustive()
    }
}

/// Outcome of a loader, ready to be merged into the tree.
#[derive(Debug)]
pub struct SettledLoad {
    node: NodeId,
    initial_active: bool,
    result: LoadResult,
}

impl SettledLoad {
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

impl Tree {
    /// Start loading the children of `id`. Without a loader the node becomes
    /// an empty leaf immediately and `None` is returned.
    pub(crate) fn begin_load(
        &mut self,
        id: NodeId,
        initial_active: bool,
        config: &TreeConfig,
    ) -> TreeResult<Option<PendingLoad>> {
        let node_ref = self.node_ref(id).ok_or(TreeError::UnknownNode(id))?;
        match config.start_load(node_ref) {
            Some(future) => {
                debug!("loading children of {id}");
                Ok(Some(PendingLoad {
                    node: id,
                    initial_active,
                    future,
                }))
            }
            None => {
                self.set_children(id, Vec::new())?;
                self.settle_empty(id)?;
                Ok(None)
            }
        }
    }

    /// Merge a settled load into the tree and call `on_loaded` once with the
    /// nodes to refresh (changed nodes plus the path to the root).
    ///
    /// A failed load asks `lazy_load_failure` whether the node is now a leaf
    /// (the default); otherwise the node is collapsed and left unloaded so
    /// the next expansion retries. Results for nodes removed in the meantime
    /// are dropped without calling `on_loaded`.
    pub fn finish_load<F>(&mut self, settled: SettledLoad, config: &TreeConfig, on_loaded: F)
    where
        F: FnOnce(&[NodeId]),
    {
        let SettledLoad {
            node: id,
            initial_active,
            result,
        } = settled;
        let Some(node) = self.get(id) else {
            debug!("dropping load result for removed node {id}");
            return;
        };

        if node.is_loaded() {
            debug!("node {id} was populated while loading; keeping its children");
        } else {
            match result {
                Ok(children) => {
                    debug!("loaded {} children of {id}", children.len());
                    if self.set_children(id, children).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    let absorb = self
                        .node_ref(id)
                        .is_some_and(|n| config.absorbs_load_failure(n, &err));
                    if absorb {
                        warn!("loading children of {id} failed, treating it as a leaf: {err}");
                        if self.set_children(id, Vec::new()).is_err() {
                            return;
                        }
                    } else {
                        warn!("loading children of {id} failed, will retry: {err}");
                        if let Ok(node) = self.node_mut(id) {
                            node.expanded = false;
                        }
                        self.touch(id);
                    }
                }
            }
        }

        if self.settle_empty(id).is_err() {
            return;
        }
        // A click while loading lands on the node's own flag.
        let Some(node) = self.get(id) else {
            return;
        };
        let active = initial_active || node.active;
        let opened = node.shown_children().is_some();
        let changed = self.set_state_for_all(id, active, config, Reach::Everything);
        if opened && self.set_active(id, false).is_err() {
            return;
        }
        let mut affected = vec![id];
        affected.extend(changed);
        let affected = self.affected(id, &affected);
        on_loaded(&affected);
    }

    /// Expand `id` and, if that starts a load, wait for it and merge it.
    /// Returns the nodes changed by the expansion itself.
    pub async fn expand_and_load<F>(
        &mut self,
        id: NodeId,
        config: &TreeConfig,
        on_loaded: F,
    ) -> TreeResult<Vec<NodeId>>
    where
        F: FnOnce(&[NodeId]),
    {
        let outcome = self.handle_expand(id, config)?;
        if let Some(pending) = outcome.pending {
            let settled = pending.settle().await;
            self.finish_load(settled, config, on_loaded);
        }
        Ok(outcome.changed)
    }

    /// A node cannot stay expanded with nothing to show.
    fn settle_empty(&mut self, id: NodeId) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        if node.expanded && node.children.as_ref().is_some_and(|c| c.is_empty()) {
            node.expanded = false;
            self.touch(id);
        }
        Ok(())
    }
}
