//! checktree - tri-state checkbox tree model
//!
//! The node model behind an interactive checkbox tree: expand/collapse,
//! tri-state selection that folds into and out of collapsed branches,
//! lazy loading of children through asynchronous hooks, and live search
//! that filters visibility without losing selection.
//!
//! ```
//! use checktree::{NodeSeed, SelectionState, Tree, TreeConfig};
//!
//! let mut tree = Tree::from_seed(
//!     NodeSeed::new(0, "Root")
//!         .with_expanded(true)
//!         .with_children(vec![NodeSeed::leaf(1, "A"), NodeSeed::leaf(2, "B")]),
//! );
//! let config = TreeConfig::default();
//! let a = tree.children_of(tree.root())[0];
//!
//! let outcome = tree.handle_activate(a, &config, false).unwrap();
//! assert_eq!(outcome.changed, vec![a]);
//! assert_eq!(
//!     tree.selection_state(tree.root(), &config),
//!     SelectionState::Indeterminate
//! );
//! ```

pub mod config;
pub mod error;
pub mod tree;

// Re-exports for convenience
pub use config::{TreeConfig, TreeConfigBuilder, ViewOptions};
pub use error::{HookError, TreeError, TreeResult};
pub use tree::{
    ExpandPhase, Materialized, NodeId, NodeKey, NodeRef, NodeSeed, Outcome, PendingLoad, Row,
    SelectionState, SettledLoad, Tree, Visibility,
};
