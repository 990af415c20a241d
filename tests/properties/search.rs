//! Property tests for search visibility.

use futures::executor::block_on;
use proptest::prelude::*;

use checktree::{TreeConfig, Visibility};

use crate::strategies::{apply, build, gestures, shape, QUERIES};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: searching twice for the same query changes nothing the
    /// second time.
    #[test]
    fn property_search_idempotent(
        children in prop::collection::vec(shape(), 1..5),
        gestures in gestures(),
        query in 0..QUERIES.len(),
    ) {
        let mut tree = build(&children);
        let config = TreeConfig::default();
        apply(&mut tree, &config, &gestures);
        let root = tree.root();

        block_on(tree.handle_search(root, QUERIES[query], &config)).unwrap();
        let first = tree.to_json(root, &config).unwrap();
        let changed = block_on(tree.handle_search(root, QUERIES[query], &config)).unwrap();

        prop_assert!(changed.is_empty(), "changed: {:?}", changed);
        prop_assert_eq!(tree.to_json(root, &config).unwrap(), first);
    }

    /// PROPERTY: a search keeps every selected node selected.
    #[test]
    fn property_search_keeps_selection(
        children in prop::collection::vec(shape(), 1..5),
        gestures in gestures(),
        query in 0..QUERIES.len(),
    ) {
        let mut tree = build(&children);
        let config = TreeConfig::default();
        apply(&mut tree, &config, &gestures);
        let root = tree.root();
        let before = tree.selected_nodes(root);

        block_on(tree.handle_search(root, QUERIES[query], &config)).unwrap();
        let after = tree.selected_nodes(root);

        for id in before {
            // Either still selected itself, or handed down to its children
            // by an ancestor being opened.
            let kept = after.contains(&id)
                || after.iter().any(|s| tree.path_to_root(*s).contains(&id));
            prop_assert!(kept, "selection of {} lost", id);
        }
    }

    /// PROPERTY: every relevant node matches and every visible path leads
    /// somewhere relevant.
    #[test]
    fn property_relevant_nodes_match(
        children in prop::collection::vec(shape(), 1..5),
        query in 0..QUERIES.len(),
    ) {
        let mut tree = build(&children);
        let config = TreeConfig::default();
        let root = tree.root();
        let query = QUERIES[query];
        block_on(tree.handle_search(root, query, &config)).unwrap();

        let matcher = checktree::Tree::search_matcher(query).unwrap();
        for id in tree.descendants(root) {
            let node = tree.get(id).unwrap();
            if node.visibility() == Visibility::Relevant {
                prop_assert!(matcher.is_match(node.name()));
                for ancestor in tree.path_to_root(id).into_iter().skip(1) {
                    prop_assert!(tree.get(ancestor).unwrap().expanded() || ancestor == root);
                    prop_assert_ne!(tree.get(ancestor).unwrap().visibility(), Visibility::Invisible);
                }
            }
        }
    }
}
