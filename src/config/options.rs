//! Plain-data view options

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TreeResult;

use super::loader::{self, ConfigWarning};

/// The flag part of a tree view's configuration.
///
/// ```toml
/// show_root = true
/// select_multiple = false
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOptions {
    /// Render the root node as a row of its own
    #[serde(default)]
    pub show_root: bool,

    /// Allow more than one node to be selected at a time
    #[serde(default = "default_true")]
    pub select_multiple: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            show_root: false,
            select_multiple: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl ViewOptions {
    /// Load options from a TOML file, ignoring unknown keys
    pub fn load(path: &Path) -> TreeResult<Self> {
        let (options, _warnings) = loader::load_with_warnings(path)?;
        Ok(options)
    }

    /// Load options and report unknown keys
    pub fn load_with_warnings(path: &Path) -> TreeResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from `path` if given, otherwise defaults, then apply
    /// `CHECKTREE_*` environment overrides
    pub fn load_or_default(path: Option<&Path>) -> Self {
        loader::load_or_default(path)
    }
}
