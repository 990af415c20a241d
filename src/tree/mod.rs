//! The node model: an arena of nodes with tri-state selection, expansion,
//! lazy loading and search visibility.
//!
//! Every operation borrows a [`TreeConfig`](crate::config::TreeConfig); the
//! tree never stores one.

mod cache;
mod key;
mod lazy;
mod node;
mod search;
mod seed;
mod selection;
mod store;
mod view;

pub use key::NodeKey;
pub use lazy::{PendingLoad, SettledLoad};
pub use node::{ExpandPhase, Node, NodeId, NodeRef, SelectionState, Visibility};
pub use search::{Materialized, SearchMatcher};
pub use seed::NodeSeed;
pub use selection::Outcome;
pub use store::Tree;
pub use view::{NodeExport, Row};
