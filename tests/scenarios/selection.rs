//! Scenario: selecting through a tree
//!
//! Journey: a user ticks nodes, opens and closes branches, and isolates a
//! single node.
//!
//! Success Criteria:
//! - Parents summarize their children as checked, partial or unchecked
//! - Collapsing a branch folds its selection into one flag and expanding
//!   hands it back
//! - Isolate leaves exactly one selected node

use checktree::{NodeKey, NodeSeed, SelectionState, Tree, TreeConfig};

use crate::common::*;

/// SCENARIO: ticking one of two leaves makes the root partial
#[test]
fn scenario_activation() {
    let mut tree = two_leaves();
    let config = TreeConfig::default();
    let (a, b) = (node(&tree, 1), node(&tree, 2));

    let outcome = tree.handle_activate(a, &config, false).unwrap();

    assert_eq!(tree.selection_state(a, &config), SelectionState::Checked);
    assert_eq!(tree.selection_state(b, &config), SelectionState::Unchecked);
    assert_eq!(
        tree.selection_state(tree.root(), &config),
        SelectionState::Indeterminate
    );
    assert_eq!(
        tree.affected(a, &outcome.changed),
        vec![a, tree.root()],
        "renderer refreshes the leaf and its path to the root"
    );
}

/// SCENARIO: isolate wins over any previous selection
#[test]
fn scenario_isolate() {
    let mut tree = Tree::from_seed(
        NodeSeed::new(0, "Root").with_expanded(true).with_children(vec![
            NodeSeed::leaf(1, "A"),
            NodeSeed::new(2, "B")
                .with_expanded(true)
                .with_children(vec![NodeSeed::leaf(21, "B1"), NodeSeed::leaf(22, "B2")]),
        ]),
    );
    let config = TreeConfig::default();
    let (a, b) = (node(&tree, 1), node(&tree, 2));
    tree.handle_activate(a, &config, false).unwrap();
    tree.handle_activate(b, &config, false).unwrap();
    assert_eq!(tree.selection_state(b, &config), SelectionState::Checked);

    tree.handle_activate(b, &config, true).unwrap();

    assert_eq!(tree.selection_state(a, &config), SelectionState::Unchecked);
    let b_node = tree.get(b).unwrap();
    assert!(b_node.active());
    assert!(!b_node.expanded());
    assert_eq!(tree.selected_keys(tree.root()), vec![NodeKey::Int(2)]);
}

/// SCENARIO: closing and reopening a branch keeps what was ticked inside
#[test]
fn scenario_fold_and_unfold() {
    let mut tree = grocery_tree();
    let config = TreeConfig::default();
    let fruit = node(&tree, 1);
    let citrus = node(&tree, 12);
    tree.handle_expand(fruit, &config).unwrap();
    tree.handle_expand(citrus, &config).unwrap();
    tree.handle_activate(node(&tree, 121), &config, false).unwrap();
    tree.handle_activate(node(&tree, 122), &config, false).unwrap();
    assert_eq!(
        tree.selection_state(fruit, &config),
        SelectionState::Indeterminate
    );

    tree.handle_expand(citrus, &config).unwrap();
    assert!(tree.get(citrus).unwrap().active(), "full selection folds to on");
    assert_eq!(keys(&tree, &tree.selected_nodes(fruit)), vec![NodeKey::Int(12)]);

    tree.handle_expand(citrus, &config).unwrap();
    assert!(!tree.get(citrus).unwrap().active());
    assert_eq!(
        keys(&tree, &tree.selected_nodes(fruit)),
        vec![NodeKey::Int(121), NodeKey::Int(122)]
    );
}

/// SCENARIO: a partial branch folds to off when closed
#[test]
fn scenario_partial_branch_folds_to_off() {
    let mut tree = grocery_tree();
    let config = TreeConfig::default();
    let veg = node(&tree, 2);
    tree.handle_expand(veg, &config).unwrap();
    tree.handle_activate(node(&tree, 21), &config, false).unwrap();

    tree.handle_expand(veg, &config).unwrap();

    assert_eq!(tree.selection_state(veg, &config), SelectionState::Unchecked);
    assert!(tree.selected_nodes(tree.root()).is_empty());
}

/// SCENARIO: in single-select mode a new pick replaces the old one
#[test]
fn scenario_single_select() {
    let mut tree = grocery_tree();
    let config = TreeConfig::builder().select_multiple(false).build();
    let fruit = node(&tree, 1);
    let veg = node(&tree, 2);

    tree.handle_activate(fruit, &config, false).unwrap();
    tree.handle_activate(veg, &config, false).unwrap();

    assert_eq!(tree.selected_keys(tree.root()), vec![NodeKey::Int(2)]);
}

/// SCENARIO: group headers that cannot be ticked still pass selection on
#[test]
fn scenario_unselectable_group_headers() {
    let mut tree = grocery_tree();
    let config = TreeConfig::builder()
        .selectable(|node, _| node.child_count() == 0 || node.parent().is_none())
        .build();
    let fruit = node(&tree, 1);
    let citrus = node(&tree, 12);

    // Clicking a header opens it instead.
    tree.handle_activate(fruit, &config, false).unwrap();
    assert!(tree.get(fruit).unwrap().expanded());
    tree.handle_expand(citrus, &config).unwrap();

    tree.handle_activate(tree.root(), &config, false).unwrap();

    let selected = keys(&tree, &tree.selected_nodes(fruit));
    assert_eq!(
        selected,
        vec![NodeKey::Int(11), NodeKey::Int(121), NodeKey::Int(122)]
    );
    // Citrus itself does not count towards Fruit, only its leaves do.
    assert_eq!(tree.selection_state(fruit, &config), SelectionState::Checked);
}
