//! Tree node data structure and its cached derived values.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::Deref;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::key::NodeKey;
use super::store::Tree;
use crate::config::TreeConfig;

/// Handle of a node inside its [`Tree`].
///
/// Handles are never reused, so a handle to a removed node stays dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tri-state selection summary of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionState {
    /// Node is selected, or every eligible child is (●)
    Checked,
    /// Some but not all eligible children are selected (◐)
    Indeterminate,
    /// Nothing selected (○)
    Unchecked,
}

/// Search-filter state of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Shown normally
    #[default]
    Visible,
    /// Shown because it matched the active query
    Relevant,
    /// Hidden by the active query
    Invisible,
}

/// Expansion phase as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandPhase {
    Collapsed,
    /// Expanded but children are still being loaded
    Expanding,
    Expanded,
}

/// A lazily computed value that is either missing or valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cached<T> {
    Absent,
    Valid(T),
}

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Cached::Absent
    }
}

impl<T: Copy> Cached<T> {
    pub(crate) fn value(self) -> Option<T> {
        match self {
            Cached::Absent => None,
            Cached::Valid(v) => Some(v),
        }
    }
}

/// Derived values of a node. Interior mutability lets reads fill the cache
/// through a shared borrow of the tree.
#[derive(Debug, Default)]
pub(crate) struct NodeCache {
    pub(crate) selection: Cell<Cached<SelectionState>>,
    pub(crate) selectable: Cell<Cached<bool>>,
    pub(crate) expandable: Cell<Cached<bool>>,
    pub(crate) selected: RefCell<Cached<Vec<NodeId>>>,
}

impl NodeCache {
    /// Forget everything.
    pub(crate) fn clear(&self) {
        self.selection.set(Cached::Absent);
        self.selectable.set(Cached::Absent);
        self.expandable.set(Cached::Absent);
        self.selected.replace(Cached::Absent);
    }

    /// Forget the values that depend on selection or visibility below.
    pub(crate) fn clear_selection(&self) {
        self.selection.set(Cached::Absent);
        self.selected.replace(Cached::Absent);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.selection.get() == Cached::Absent
            && self.selectable.get() == Cached::Absent
            && self.expandable.get() == Cached::Absent
            && matches!(*self.selected.borrow(), Cached::Absent)
    }
}

/// A node in the tree structure
#[derive(Debug)]
pub struct Node {
    pub(crate) key: NodeKey,
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    /// `None` until loaded; an empty map is a definite leaf
    pub(crate) children: Option<IndexMap<NodeKey, NodeId>>,
    pub(crate) active: bool,
    pub(crate) expanded: bool,
    /// Collapsed by a search while its children held selection. The
    /// children keep carrying it until the branch is opened again.
    pub(crate) search_collapsed: bool,
    pub(crate) visibility: Visibility,
    pub(crate) cache: NodeCache,
}

impl Node {
    pub(crate) fn new(key: NodeKey, name: String) -> Self {
        Self {
            key,
            name,
            parent: None,
            children: None,
            active: false,
            expanded: false,
            search_collapsed: false,
            visibility: Visibility::Visible,
            cache: NodeCache::default(),
        }
    }

    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Loaded children keyed by their [`NodeKey`], in storage order.
    pub fn children(&self) -> Option<&IndexMap<NodeKey, NodeId>> {
        self.children.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.children.is_some()
    }

    pub fn child_count(&self) -> usize {
        self.children.as_ref().map_or(0, IndexMap::len)
    }

    /// Own selection flag; only meaningful while collapsed or childless.
    pub fn active(&self) -> bool {
        self.active
    }

    pub fn expanded(&self) -> bool {
        self.expanded
    }

    /// Collapsed by a search without folding the selection below it
    pub fn search_collapsed(&self) -> bool {
        self.search_collapsed
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn phase(&self) -> ExpandPhase {
        match (self.expanded, self.children.is_some()) {
            (false, _) => ExpandPhase::Collapsed,
            (true, false) => ExpandPhase::Expanding,
            (true, true) => ExpandPhase::Expanded,
        }
    }

    /// Children that currently carry this node's selection: the node is
    /// expanded (or collapsed by a search) and has at least one loaded child.
    pub(crate) fn shown_children(&self) -> Option<Vec<NodeId>> {
        if !self.expanded && !self.search_collapsed {
            return None;
        }
        self.children
            .as_ref()
            .filter(|c| !c.is_empty())
            .map(|c| c.values().copied().collect())
    }
}

/// Read-only view of a live node together with its tree.
///
/// This is what configuration predicates, sort comparators and hooks receive,
/// so they can walk to the parent or look at siblings.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a Tree,
    id: NodeId,
    node: &'a Node,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(tree: &'a Tree, id: NodeId, node: &'a Node) -> Self {
        Self { tree, id, node }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a Tree {
        self.tree
    }

    pub fn parent_ref(&self) -> Option<NodeRef<'a>> {
        self.node.parent.and_then(|p| self.tree.node_ref(p))
    }

    pub fn child_refs(&self) -> Vec<NodeRef<'a>> {
        self.tree
            .children_of(self.id)
            .into_iter()
            .filter_map(|c| self.tree.node_ref(c))
            .collect()
    }

    pub fn path_to_root(&self) -> Vec<NodeId> {
        self.tree.path_to_root(self.id)
    }

    pub fn is_selectable(&self, config: &TreeConfig) -> bool {
        self.tree.is_selectable(self.id, config)
    }

    pub fn is_expandable(&self, config: &TreeConfig) -> bool {
        self.tree.is_expandable(self.id, config)
    }

    pub fn selection_state(&self, config: &TreeConfig) -> SelectionState {
        self.tree.selection_state(self.id, config)
    }
}

impl Deref for NodeRef<'_> {
    type Target = Node;

    fn deref(&self) -> &Node {
        self.node
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("key", &self.node.key)
            .field("name", &self.node.name)
            .finish()
    }
}
