//! Tree shapes and gesture sequences shared by the property tests.

#![allow(dead_code)]

use futures::executor::block_on;
use proptest::prelude::*;

use checktree::{NodeId, NodeSeed, Tree, TreeConfig};

const NAMES: &[&str] = &[
    "alpha", "beta", "Gamma", "delta", "alphabet", "Beta Max", "epsilon", "zeta",
];

pub const QUERIES: &[&str] = &["a", "beta", "ALPHA", "zeta", "x", "", "  "];

#[derive(Debug, Clone)]
pub enum Shape {
    Leaf,
    Unloaded,
    Branch(Vec<Shape>),
}

pub fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![3 => Just(Shape::Leaf), 1 => Just(Shape::Unloaded)];
    leaf.prop_recursive(4, 40, 4, |inner| {
        prop::collection::vec(inner, 1..4).prop_map(Shape::Branch)
    })
}

/// Build a tree whose root is an expanded branch over `children`
pub fn build(children: &[Shape]) -> Tree {
    let mut next = 1;
    let seeds = children.iter().map(|s| seed(s, &mut next)).collect();
    Tree::from_seed(
        NodeSeed::new(0, "root")
            .with_expanded(true)
            .with_children(seeds),
    )
}

fn seed(shape: &Shape, next: &mut i64) -> NodeSeed {
    let key = *next;
    *next += 1;
    let name = NAMES[(key as usize) % NAMES.len()];
    match shape {
        Shape::Leaf => NodeSeed::leaf(key, name),
        Shape::Unloaded => NodeSeed::new(key, name),
        Shape::Branch(children) => {
            NodeSeed::new(key, name).with_children(children.iter().map(|c| seed(c, next)).collect())
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Gesture {
    Activate(usize),
    Expand(usize),
    Isolate(usize),
    Search(usize),
}

pub fn gestures() -> impl Strategy<Value = Vec<Gesture>> {
    let gesture = prop_oneof![
        4 => any::<usize>().prop_map(Gesture::Activate),
        4 => any::<usize>().prop_map(Gesture::Expand),
        1 => any::<usize>().prop_map(Gesture::Isolate),
        1 => any::<usize>().prop_map(Gesture::Search),
    ];
    prop::collection::vec(gesture, 0..24)
}

/// Pick a live node by position in pre-order
pub fn pick(tree: &Tree, index: usize) -> NodeId {
    let all = tree.descendants(tree.root());
    all[index % all.len()]
}

pub fn apply(tree: &mut Tree, config: &TreeConfig, gestures: &[Gesture]) {
    for gesture in gestures {
        match *gesture {
            Gesture::Activate(i) => {
                let id = pick(tree, i);
                tree.handle_activate(id, config, false).unwrap();
            }
            Gesture::Expand(i) => {
                let id = pick(tree, i);
                tree.handle_expand(id, config).unwrap();
            }
            Gesture::Isolate(i) => {
                let id = pick(tree, i);
                tree.handle_activate(id, config, true).unwrap();
            }
            Gesture::Search(i) => {
                let root = tree.root();
                block_on(tree.handle_search(root, QUERIES[i % QUERIES.len()], config)).unwrap();
            }
        }
    }
}
