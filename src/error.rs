//! Error types for checktree
//!
//! Uses `thiserror` for library errors. Policy violations (expanding a
//! non-expandable node, activating a stale handle) are filtered silently and
//! never show up here.

use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

use crate::tree::NodeId;

/// Result type alias for checktree operations
pub type TreeResult<T> = Result<T, TreeError>;

/// Main error type for checktree operations
#[derive(Error, Debug)]
pub enum TreeError {
    /// Handle does not refer to a live node
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// The remote search hook failed; the tree was left untouched
    #[error("remote search for '{query}' failed: {source}")]
    RemoteSearch {
        query: String,
        #[source]
        source: HookError,
    },

    /// Search query could not be compiled into a matcher
    #[error("invalid search query '{query}': {message}")]
    InvalidQuery { query: String, message: String },

    /// Invalid view configuration file
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure reported by a caller-supplied hook (`lazy_load`, `remote_search`).
#[derive(Error, Debug)]
#[error("{message}")]
pub struct HookError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error (transport, decoding, ...) with a message.
    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
