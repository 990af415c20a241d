//! Node arena: ownership, structure and traversal.
//!
//! Every node lives in a slot of the tree. A node's child map is the only
//! owning edge; the parent link is a plain handle used for walking upward.

use indexmap::IndexMap;

use super::key::NodeKey;
use super::node::{Cached, Node, NodeId, NodeRef};
use super::seed::NodeSeed;
use crate::error::{TreeError, TreeResult};

#[derive(Debug)]
pub struct Tree {
    slots: Vec<Option<Node>>,
    root: NodeId,
}

impl Tree {
    /// Create a tree holding a single unloaded root
    pub fn new(key: impl Into<NodeKey>, name: impl Into<String>) -> Self {
        Self::from_seed(NodeSeed::new(key, name))
    }

    /// Build a tree from a seed; the seed becomes the root
    pub fn from_seed(seed: NodeSeed) -> Self {
        let mut tree = Self {
            slots: Vec::with_capacity(seed.count()),
            root: NodeId(0),
        };
        tree.root = tree.plant(seed, None);
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn node_ref(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.get(id).map(|node| NodeRef::new(self, id, node))
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn node(&self, id: NodeId) -> TreeResult<&Node> {
        self.get(id).ok_or(TreeError::UnknownNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> TreeResult<&mut Node> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(TreeError::UnknownNode(id))
    }

    /// Loaded children in storage order (empty when unloaded)
    pub fn children_of(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id)
            .and_then(|n| n.children.as_ref())
            .map(|c| c.values().copied().collect())
            .unwrap_or_default()
    }

    pub fn child(&self, parent: NodeId, key: &NodeKey) -> Option<NodeId> {
        self.get(parent)?.children.as_ref()?.get(key).copied()
    }

    /// First node with `key` in depth-first order from the root
    pub fn find(&self, key: &NodeKey) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&id| self.get(id).is_some_and(|n| &n.key == key))
    }

    /// Follow a key path starting below the root
    pub fn find_path(&self, keys: &[NodeKey]) -> Option<NodeId> {
        keys.iter()
            .try_fold(self.root, |current, key| self.child(current, key))
    }

    /// The node itself followed by its ancestors, ending at the root
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.get(id).map(|_| id);
        while let Some(node_id) = current {
            path.push(node_id);
            current = self.get(node_id).and_then(|n| n.parent);
        }
        path
    }

    /// Topmost ancestor of `id` (the tree root unless `id` is detached)
    pub fn root_of(&self, id: NodeId) -> NodeId {
        self.path_to_root(id).last().copied().unwrap_or(id)
    }

    /// `id` and every loaded node below it, in pre-order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.get(current) else {
                continue;
            };
            out.push(current);
            if let Some(children) = &node.children {
                stack.extend(children.values().rev().copied());
            }
        }
        out
    }

    /// Add an unloaded child, replacing any existing child with the same key
    pub fn add_child(
        &mut self,
        parent: NodeId,
        key: impl Into<NodeKey>,
        name: impl Into<String>,
    ) -> TreeResult<NodeId> {
        self.insert_seed(parent, NodeSeed::new(key, name))
    }

    /// Link a seed (for example a clone) under `parent`.
    ///
    /// Loads `parent` with an empty set first if it was unloaded. A child with
    /// the same key is replaced together with its subtree.
    pub fn insert_seed(&mut self, parent: NodeId, seed: NodeSeed) -> TreeResult<NodeId> {
        self.node(parent)?;
        let key = seed.id.clone();
        let child = self.plant(seed, Some(parent));
        let previous = self
            .node_mut(parent)?
            .children
            .get_or_insert_with(IndexMap::new)
            .insert(key, child);
        if let Some(old) = previous {
            self.free_subtree(old);
        }
        self.structure_changed(parent);
        Ok(child)
    }

    /// Replace the loaded children of `id` with `seeds`.
    pub fn set_children(&mut self, id: NodeId, seeds: Vec<NodeSeed>) -> TreeResult<Vec<NodeId>> {
        let old = self.node_mut(id)?.children.replace(IndexMap::new());
        for child in old.into_iter().flat_map(|c| c.into_values()) {
            self.free_subtree(child);
        }

        let mut map = IndexMap::with_capacity(seeds.len());
        for seed in seeds {
            let key = seed.id.clone();
            let child = self.plant(seed, Some(id));
            if let Some(dup) = map.insert(key, child) {
                self.free_subtree(dup);
            }
        }
        let ids = map.values().copied().collect();
        self.node_mut(id)?.children = Some(map);
        self.structure_changed(id);
        Ok(ids)
    }

    /// Forget the children of `id` so the next expansion loads them again
    pub fn unload(&mut self, id: NodeId) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        let old = node.children.take();
        node.expanded = false;
        node.search_collapsed = false;
        for child in old.into_iter().flat_map(|c| c.into_values()) {
            self.free_subtree(child);
        }
        self.structure_changed(id);
        Ok(())
    }

    /// Detach `id` from its parent and drop it, returning a deep copy.
    /// The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> TreeResult<Option<NodeSeed>> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(None);
        };
        let seed = self.clone_node(id, true)?;
        let key = self.node(id)?.key.clone();
        if let Some(children) = self.node_mut(parent)?.children.as_mut() {
            children.shift_remove(&key);
        }
        self.free_subtree(id);
        self.structure_changed(parent);
        Ok(Some(seed))
    }

    /// Structurally independent copy of a node.
    ///
    /// The copy keeps key, name, `active` and `expanded` but has no parent
    /// and no cached values. A branch collapsed by a search is copied open,
    /// since its children still carry its selection. A shallow copy never has children; a recursive
    /// copy carries the loaded subtree.
    pub fn clone_node(&self, id: NodeId, recursive: bool) -> TreeResult<NodeSeed> {
        let node = self.node(id)?;
        let children = if recursive {
            match &node.children {
                Some(children) => Some(
                    children
                        .values()
                        .map(|&c| self.clone_node(c, true))
                        .collect::<TreeResult<Vec<_>>>()?,
                ),
                None => None,
            }
        } else {
            None
        };
        Ok(NodeSeed {
            id: node.key.clone(),
            name: node.name.clone(),
            active: node.active,
            expanded: node.expanded || node.search_collapsed,
            children,
        })
    }

    /// Allocate a seed and its subtree. Seeds claiming to be expanded without
    /// any loaded child are planted collapsed.
    fn plant(&mut self, seed: NodeSeed, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.slots.len());
        let mut node = Node::new(seed.id, seed.name);
        node.parent = parent;
        node.active = seed.active;
        node.expanded = seed.expanded && seed.children.as_ref().is_some_and(|c| !c.is_empty());
        self.slots.push(Some(node));

        if let Some(children) = seed.children {
            let mut map = IndexMap::with_capacity(children.len());
            for child in children {
                let key = child.id.clone();
                let child_id = self.plant(child, Some(id));
                if let Some(dup) = map.insert(key, child_id) {
                    self.free_subtree(dup);
                }
            }
            if let Some(Some(node)) = self.slots.get_mut(id.0) {
                node.children = Some(map);
            }
        }
        id
    }

    fn free_subtree(&mut self, id: NodeId) {
        for node in self.descendants(id) {
            if let Some(slot) = self.slots.get_mut(node.0) {
                *slot = None;
            }
        }
    }

    /// Children of `id` changed: expandability and every aggregate up to the
    /// root are stale.
    fn structure_changed(&mut self, id: NodeId) {
        if let Some(node) = self.get(id) {
            node.cache.expandable.set(Cached::Absent);
        }
        self.touch(id);
    }

    /// Invalidate the selection aggregates of `id` and all its ancestors.
    pub(crate) fn touch(&self, id: NodeId) {
        for node_id in self.path_to_root(id) {
            if let Some(node) = self.get(node_id) {
                node.cache.clear_selection();
            }
        }
    }
}
