#![no_main]

use libfuzzer_sys::fuzz_target;

use checktree::{NodeSeed, Tree, TreeConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    // Any seed that parses must build a tree that renders and exports.
    if let Ok(seed) = NodeSeed::from_json(content) {
        let tree = Tree::from_seed(seed);
        let config = TreeConfig::default();
        let _ = tree.rows(&config);
        let _ = tree.to_json(tree.root(), &config);
    }
});
