//! Search: three-valued visibility over a subtree.
//!
//! A query marks matching nodes `Relevant`, reveals and expands their
//! ancestors and hides and collapses everything else. Hidden nodes keep
//! their selection: a branch whose children hold some is collapsed without
//! folding and reopened when the filter is cleared.

use std::collections::HashMap;
use std::ops::Range;

use log::debug;
use regex::{Regex, RegexBuilder};

use super::node::{NodeId, Visibility};
use super::seed::NodeSeed;
use super::store::Tree;
use crate::config::TreeConfig;
use crate::error::{TreeError, TreeResult};

/// Children a remote search wants present before filtering.
///
/// Unloaded parents get exactly these children; loaded parents gain the
/// keys they do not have yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materialized {
    pub parent: NodeId,
    pub children: Vec<NodeSeed>,
}

impl Materialized {
    pub fn new(parent: NodeId, children: Vec<NodeSeed>) -> Self {
        Self { parent, children }
    }
}

/// Literal, case-insensitive substring matcher for node names.
#[derive(Debug, Clone)]
pub struct SearchMatcher {
    regex: Regex,
}

impl SearchMatcher {
    /// Compile `query` (trimmed). Regex metacharacters match themselves.
    pub fn new(query: &str) -> TreeResult<Self> {
        let trimmed = query.trim();
        let regex = RegexBuilder::new(&regex::escape(trimmed))
            .case_insensitive(true)
            .build()
            .map_err(|e| TreeError::InvalidQuery {
                query: query.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { regex })
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Byte range of the first match, for highlighting
    pub fn find(&self, name: &str) -> Option<Range<usize>> {
        self.regex.find(name).map(|m| m.range())
    }
}

/// What a renderer sees of one node; a search reports nodes where it moved.
type Shown = (Visibility, bool, bool);

impl Tree {
    /// Matcher used by [`Tree::handle_search`] for `query`
    pub fn search_matcher(query: &str) -> TreeResult<SearchMatcher> {
        SearchMatcher::new(query)
    }

    /// Filter the subtree of `id` by `query` and return the nodes whose
    /// visibility, expansion or flag changed (including materialized ones).
    ///
    /// The `remote_search` hook, if any, is awaited first. If it fails the
    /// error is returned and the tree is untouched. A blank query clears the
    /// filter, refreshes every cached value below `id` and runs
    /// [`Tree::optimize`]. Unloaded nodes are never loaded for searching.
    pub async fn handle_search(
        &mut self,
        id: NodeId,
        query: &str,
        config: &TreeConfig,
    ) -> TreeResult<Vec<NodeId>> {
        let trimmed = query.trim();
        let matcher = if trimmed.is_empty() {
            None
        } else {
            Some(SearchMatcher::new(trimmed)?)
        };

        let remote = {
            let node = self.node_ref(id).ok_or(TreeError::UnknownNode(id))?;
            config.start_remote_search(trimmed, node)
        };
        let before = self.shown(id);
        if let Some(remote) = remote {
            let materialized = remote.await.map_err(|source| TreeError::RemoteSearch {
                query: query.to_string(),
                source,
            })?;
            self.materialize(materialized)?;
        }

        self.set_subtree_visibility(id, Visibility::Visible);
        match matcher {
            None => {
                debug!("clearing search below {id}");
                self.reopen_search_collapsed(id);
                self.dirty_subtree(id);
                self.optimize(id, config)?;
            }
            Some(matcher) => {
                let found = self.search_node(id, &matcher, config)?;
                debug!("search '{trimmed}' below {id}: match found = {found}");
            }
        }

        let after = self.shown(id);
        let mut changed: Vec<NodeId> = self
            .descendants(id)
            .into_iter()
            .filter(|n| before.get(n) != after.get(n))
            .collect();
        changed.sort();
        Ok(changed)
    }

    /// Collapse every descendant branch of `id` that carries no selection.
    ///
    /// Active nodes and collapsed nodes (including branches a search
    /// collapsed) are left alone; branches holding some selection are
    /// walked. `id` keeps its own expansion. Returns the collapsed nodes.
    pub fn optimize(&mut self, id: NodeId, config: &TreeConfig) -> TreeResult<Vec<NodeId>> {
        self.node(id)?;
        let mut collapsed = Vec::new();
        for child in self.children_of(id) {
            self.optimize_branch(child, config, &mut collapsed)?;
        }
        Ok(collapsed)
    }

    fn optimize_branch(
        &mut self,
        id: NodeId,
        config: &TreeConfig,
        collapsed: &mut Vec<NodeId>,
    ) -> TreeResult<()> {
        let node = self.node(id)?;
        if node.active || !node.expanded {
            return Ok(());
        }
        if self.selected_nodes(id).is_empty() {
            self.set_expanded(id, false, config)?;
            collapsed.push(id);
            return Ok(());
        }
        for child in self.children_of(id) {
            self.optimize_branch(child, config, collapsed)?;
        }
        Ok(())
    }

    /// Returns whether the subtree of `id` holds a match.
    fn search_node(
        &mut self,
        id: NodeId,
        matcher: &SearchMatcher,
        config: &TreeConfig,
    ) -> TreeResult<bool> {
        if matcher.is_match(&self.node(id)?.name) {
            self.set_visibility(id, Visibility::Relevant);
            return Ok(true);
        }

        let mut found = false;
        for child in self.children_of(id) {
            found |= self.search_node(child, matcher, config)?;
        }

        if found {
            // Ancestor of a match: shown and opened up to it.
            self.set_expanded(id, true, config)?;
        } else {
            self.set_visibility(id, Visibility::Invisible);
            if self.node(id)?.expanded {
                if self.selected_nodes(id).is_empty() {
                    self.set_expanded(id, false, config)?;
                } else {
                    let node = self.node_mut(id)?;
                    node.expanded = false;
                    node.search_collapsed = true;
                    self.touch(id);
                }
            }
        }
        Ok(found)
    }

    /// Open every branch below `id` that a search collapsed.
    fn reopen_search_collapsed(&mut self, id: NodeId) {
        for node_id in self.descendants(id) {
            let Ok(node) = self.node_mut(node_id) else {
                continue;
            };
            if node.search_collapsed {
                node.expanded = true;
                node.search_collapsed = false;
                self.touch(node_id);
            }
        }
    }

    /// Attach what a remote search returned. Parents removed meanwhile are
    /// skipped.
    fn materialize(&mut self, batches: Vec<Materialized>) -> TreeResult<()> {
        for Materialized { parent, children } in batches {
            let Some(node) = self.get(parent) else {
                debug!("remote search returned children for removed node {parent}");
                continue;
            };
            if node.is_loaded() {
                for seed in children {
                    if self.child(parent, &seed.id).is_none() {
                        self.insert_seed(parent, seed)?;
                    }
                }
            } else {
                debug!("remote search loaded {} children of {parent}", children.len());
                self.set_children(parent, children)?;
            }
        }
        Ok(())
    }

    /// Returns whether the visibility changed.
    pub(crate) fn set_visibility(&mut self, id: NodeId, visibility: Visibility) -> bool {
        let Ok(node) = self.node_mut(id) else {
            return false;
        };
        if node.visibility == visibility {
            return false;
        }
        node.visibility = visibility;
        self.touch(id);
        true
    }

    fn set_subtree_visibility(&mut self, id: NodeId, visibility: Visibility) {
        for node in self.descendants(id) {
            self.set_visibility(node, visibility);
        }
    }

    fn shown(&self, id: NodeId) -> HashMap<NodeId, Shown> {
        self.descendants(id)
            .into_iter()
            .filter_map(|n| {
                self.get(n)
                    .map(|node| (n, (node.visibility, node.expanded, node.active)))
            })
            .collect()
    }
}
