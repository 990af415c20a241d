#![no_main]

use futures::executor::block_on;
use libfuzzer_sys::fuzz_target;

use checktree::{NodeSeed, Tree, TreeConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(query) = std::str::from_utf8(data) else {
        return;
    };
    let mut tree = Tree::from_seed(
        NodeSeed::new(0, "root").with_expanded(true).with_children(vec![
            NodeSeed::leaf(1, "a.b*c"),
            NodeSeed::new(2, "[group]").with_children(vec![NodeSeed::leaf(3, "(x|y)")]),
        ]),
    );
    let config = TreeConfig::default();
    let root = tree.root();
    // Queries are literal: metacharacters must never fail to compile.
    assert!(block_on(tree.handle_search(root, query, &config)).is_ok());
});
