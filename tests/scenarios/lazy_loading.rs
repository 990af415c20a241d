//! Scenario: opening branches that load on demand
//!
//! Journey: a user opens a branch whose children live elsewhere (a server,
//! a slow disk). The branch shows as opening at once and fills in when the
//! loader answers.
//!
//! Success Criteria:
//! - Expansion is visible before the load settles
//! - The refresh callback fires once per settled load
//! - Failed loads follow the configured failure policy

use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::executor::block_on;

use checktree::{ExpandPhase, HookError, NodeKey, NodeSeed, SelectionState, TreeConfig};

use crate::common::*;

/// Loader answering with three children named after the node's key path.
fn path_loader(calls: Arc<AtomicUsize>) -> TreeConfig {
    TreeConfig::builder()
        .lazy_load(move |node| {
            calls.fetch_add(1, Ordering::SeqCst);
            let tree = node.tree();
            let path: Vec<String> = node
                .path_to_root()
                .into_iter()
                .rev()
                .map(|id| tree.get(id).unwrap().key().to_string())
                .collect();
            async move {
                let prefix = path.join("/");
                Ok((1..=3)
                    .map(|i| NodeSeed::new(format!("{prefix}/{i}"), format!("item {i}")))
                    .collect())
            }
        })
        .build()
}

/// SCENARIO: a lazy branch fills in after its loader settles
#[test]
fn scenario_lazy_load() {
    let mut tree = grocery_tree();
    let calls = Arc::new(AtomicUsize::new(0));
    let config = path_loader(calls.clone());
    let pantry = node(&tree, 3);
    let root = tree.root();

    let outcome = tree.handle_expand(pantry, &config).unwrap();

    assert!(tree.get(pantry).unwrap().expanded());
    assert!(tree.get(pantry).unwrap().children().is_none());
    assert_eq!(tree.get(pantry).unwrap().phase(), ExpandPhase::Expanding);

    let pending = outcome.pending.expect("expanding an unloaded node starts a load");
    let settled = block_on(pending.settle());
    assert!(settled.is_ok());

    let fired = Cell::new(0);
    tree.finish_load(settled, &config, |affected| {
        fired.set(fired.get() + 1);
        assert!(affected.contains(&pantry));
        assert!(affected.contains(&root));
    });

    assert_eq!(fired.get(), 1);
    assert_eq!(tree.get(pantry).unwrap().child_count(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let first = tree.children_of(pantry)[0];
    assert_eq!(
        tree.get(first).unwrap().key(),
        &NodeKey::Str("0/3/1".to_string())
    );
}

/// SCENARIO: a ticked lazy branch hands its tick to what it loads
#[test]
fn scenario_loaded_children_inherit_selection() {
    let mut tree = grocery_tree();
    let config = path_loader(Arc::new(AtomicUsize::new(0)));
    let pantry = node(&tree, 3);
    tree.handle_activate(pantry, &config, false).unwrap();

    block_on(tree.expand_and_load(pantry, &config, |_| {})).unwrap();

    assert_eq!(tree.selected_nodes(pantry).len(), 3);
    assert_eq!(tree.selection_state(pantry, &config), SelectionState::Checked);

    // Closing it again folds the three back into one.
    tree.handle_expand(pantry, &config).unwrap();
    assert_eq!(tree.selected_nodes(pantry), vec![pantry]);
}

/// SCENARIO: a loader that finds nothing turns the branch into a leaf
#[test]
fn scenario_empty_load_makes_a_leaf() {
    let mut tree = grocery_tree();
    let config = TreeConfig::builder()
        .lazy_load(|_| async { Ok(Vec::new()) })
        .build();
    let pantry = node(&tree, 3);

    block_on(tree.expand_and_load(pantry, &config, |_| {})).unwrap();

    assert!(!tree.get(pantry).unwrap().expanded());
    assert!(!tree.is_expandable(pantry, &config));
    assert!(tree.handle_expand(pantry, &config).unwrap().is_noop());
}

/// SCENARIO: a failing loader leaves the branch retryable when asked to
#[test]
fn scenario_failed_load_is_retried() {
    let mut tree = grocery_tree();
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = attempts.clone();
    let config = TreeConfig::builder()
        .lazy_load(move |_| {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err(HookError::new("connection reset"))
                } else {
                    Ok(vec![NodeSeed::leaf(31, "Rice")])
                }
            }
        })
        .lazy_load_failure(|_, err| !err.message().contains("reset"))
        .build();
    let pantry = node(&tree, 3);

    block_on(tree.expand_and_load(pantry, &config, |_| {})).unwrap();
    assert!(!tree.get(pantry).unwrap().is_loaded());
    assert!(!tree.get(pantry).unwrap().expanded());

    block_on(tree.expand_and_load(pantry, &config, |_| {})).unwrap();
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert_eq!(keys(&tree, &tree.children_of(pantry)), vec![NodeKey::Int(31)]);
    assert!(tree.get(pantry).unwrap().expanded());
}

/// SCENARIO: by default a failing loader turns the branch into a leaf
#[test]
fn scenario_failed_load_is_absorbed_by_default() {
    let mut tree = grocery_tree();
    let config = TreeConfig::builder()
        .lazy_load(|_| async { Err(HookError::new("not found")) })
        .build();
    let pantry = node(&tree, 3);

    let fired = Cell::new(false);
    block_on(tree.expand_and_load(pantry, &config, |_| fired.set(true))).unwrap();

    assert!(fired.get());
    assert!(tree.get(pantry).unwrap().is_loaded());
    assert_eq!(tree.get(pantry).unwrap().child_count(), 0);
    assert!(!tree.is_expandable(pantry, &config));
}
