//! Common test utilities for checktree integration tests.
//!
//! Fixtures build small trees with stable integer keys so tests can look
//! nodes up by key instead of by handle.

#![allow(dead_code)]

use checktree::{NodeId, NodeKey, NodeSeed, Tree};

/// ```text
/// Root (expanded)
/// ├── Fruit
/// │   ├── Apple
/// │   └── Citrus
/// │       ├── Lemon
/// │       └── Lime
/// ├── Vegetables
/// │   ├── Carrot
/// │   └── Leek
/// └── Pantry (unloaded)
/// ```
pub fn grocery_tree() -> Tree {
    Tree::from_seed(
        NodeSeed::new(0, "Root").with_expanded(true).with_children(vec![
            NodeSeed::new(1, "Fruit").with_children(vec![
                NodeSeed::leaf(11, "Apple"),
                NodeSeed::new(12, "Citrus").with_children(vec![
                    NodeSeed::leaf(121, "Lemon"),
                    NodeSeed::leaf(122, "Lime"),
                ]),
            ]),
            NodeSeed::new(2, "Vegetables").with_children(vec![
                NodeSeed::leaf(21, "Carrot"),
                NodeSeed::leaf(22, "Leek"),
            ]),
            NodeSeed::new(3, "Pantry"),
        ]),
    )
}

/// Root with two leaves A (1) and B (2)
pub fn two_leaves() -> Tree {
    Tree::from_seed(
        NodeSeed::new(0, "Root")
            .with_expanded(true)
            .with_children(vec![NodeSeed::leaf(1, "A"), NodeSeed::leaf(2, "B")]),
    )
}

/// Handle of the node with integer key `key`
pub fn node(tree: &Tree, key: i64) -> NodeId {
    tree.find(&NodeKey::Int(key))
        .unwrap_or_else(|| panic!("no node with key {key}"))
}

pub fn keys(tree: &Tree, ids: &[NodeId]) -> Vec<NodeKey> {
    ids.iter()
        .map(|&id| tree.get(id).unwrap().key().clone())
        .collect()
}
