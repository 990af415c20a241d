//! Configuration module for checktree
//!
//! Two layers:
//! 1. [`ViewOptions`]: plain flags, loadable from TOML with `CHECKTREE_*`
//!    environment overrides
//! 2. [`TreeConfig`]: the options plus the embedding application's
//!    policies and asynchronous hooks

mod loader;
mod options;
mod policy;

pub use loader::{load_with_warnings, with_env_overrides, ConfigWarning};
pub use options::ViewOptions;
pub use policy::{LoadResult, RemoteSearchResult, TreeConfig, TreeConfigBuilder};
