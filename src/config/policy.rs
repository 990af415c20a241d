//! Tree view policies: predicates, ordering and asynchronous hooks.
//!
//! A [`TreeConfig`] is built once per view and only ever borrowed by tree
//! operations. Every hook is optional; the accessor methods here are the
//! single place where a missing hook turns into its default behavior.

use std::cmp::Ordering;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use super::options::ViewOptions;
use crate::error::HookError;
use crate::tree::{Materialized, NodeRef, NodeSeed};

/// Result of a lazy load: the children of the node
pub type LoadResult = Result<Vec<NodeSeed>, HookError>;

/// Result of a remote search: subtrees to materialize before filtering
pub type RemoteSearchResult = Result<Vec<Materialized>, HookError>;

type Predicate = Arc<dyn Fn(NodeRef<'_>, &TreeConfig) -> bool + Send + Sync>;
type LazyLoadFn = Arc<dyn Fn(NodeRef<'_>) -> BoxFuture<'static, LoadResult> + Send + Sync>;
type LoadFailureFn = Arc<dyn Fn(NodeRef<'_>, &HookError) -> bool + Send + Sync>;
type RemoteSearchFn =
    Arc<dyn Fn(&str, NodeRef<'_>) -> BoxFuture<'static, RemoteSearchResult> + Send + Sync>;
type SortFn = Arc<dyn Fn(NodeRef<'_>, NodeRef<'_>) -> Ordering + Send + Sync>;
type FilterFn = Arc<dyn Fn(NodeRef<'_>) -> bool + Send + Sync>;

/// Policy bundle for one tree view.
#[derive(Clone, Default)]
pub struct TreeConfig {
    options: ViewOptions,
    expandable: Option<Predicate>,
    selectable: Option<Predicate>,
    lazy_load: Option<LazyLoadFn>,
    lazy_load_failure: Option<LoadFailureFn>,
    remote_search: Option<RemoteSearchFn>,
    sort: Option<SortFn>,
    filter: Option<FilterFn>,
}

impl TreeConfig {
    /// Configuration with `options` and no hooks
    pub fn new(options: ViewOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn builder() -> TreeConfigBuilder {
        TreeConfigBuilder::default()
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn show_root(&self) -> bool {
        self.options.show_root
    }

    pub fn select_multiple(&self) -> bool {
        self.options.select_multiple
    }

    /// `expandable` policy; everything is expandable without one
    pub fn allows_expand(&self, node: NodeRef<'_>) -> bool {
        self.expandable.as_ref().map_or(true, |f| f(node, self))
    }

    /// `selectable` policy; everything is selectable without one
    pub fn allows_select(&self, node: NodeRef<'_>) -> bool {
        self.selectable.as_ref().map_or(true, |f| f(node, self))
    }

    /// Start loading the children of `node`, if a loader is configured
    pub fn start_load(&self, node: NodeRef<'_>) -> Option<BoxFuture<'static, LoadResult>> {
        self.lazy_load.as_ref().map(|f| f(node))
    }

    /// Whether a failed load turns `node` into a leaf (the default) instead
    /// of leaving it unloaded for a retry
    pub fn absorbs_load_failure(&self, node: NodeRef<'_>, error: &HookError) -> bool {
        self.lazy_load_failure
            .as_ref()
            .map_or(true, |f| f(node, error))
    }

    pub fn start_remote_search(
        &self,
        query: &str,
        node: NodeRef<'_>,
    ) -> Option<BoxFuture<'static, RemoteSearchResult>> {
        self.remote_search.as_ref().map(|f| f(query, node))
    }

    /// Display order of two siblings; storage order without a comparator
    pub fn compare(&self, a: NodeRef<'_>, b: NodeRef<'_>) -> Ordering {
        self.sort.as_ref().map_or(Ordering::Equal, |f| f(a, b))
    }

    /// `filter` policy; every node is shown without one
    pub fn shows(&self, node: NodeRef<'_>) -> bool {
        self.filter.as_ref().map_or(true, |f| f(node))
    }
}

impl fmt::Debug for TreeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeConfig")
            .field("options", &self.options)
            .field("expandable", &self.expandable.is_some())
            .field("selectable", &self.selectable.is_some())
            .field("lazy_load", &self.lazy_load.is_some())
            .field("lazy_load_failure", &self.lazy_load_failure.is_some())
            .field("remote_search", &self.remote_search.is_some())
            .field("sort", &self.sort.is_some())
            .field("filter", &self.filter.is_some())
            .finish()
    }
}

/// Builder for [`TreeConfig`]
#[derive(Default)]
pub struct TreeConfigBuilder {
    config: TreeConfig,
}

impl TreeConfigBuilder {
    pub fn options(mut self, options: ViewOptions) -> Self {
        self.config.options = options;
        self
    }

    pub fn show_root(mut self, show_root: bool) -> Self {
        self.config.options.show_root = show_root;
        self
    }

    pub fn select_multiple(mut self, select_multiple: bool) -> Self {
        self.config.options.select_multiple = select_multiple;
        self
    }

    pub fn expandable<F>(mut self, f: F) -> Self
    where
        F: Fn(NodeRef<'_>, &TreeConfig) -> bool + Send + Sync + 'static,
    {
        self.config.expandable = Some(Arc::new(f));
        self
    }

    pub fn selectable<F>(mut self, f: F) -> Self
    where
        F: Fn(NodeRef<'_>, &TreeConfig) -> bool + Send + Sync + 'static,
    {
        self.config.selectable = Some(Arc::new(f));
        self
    }

    /// Loader asked for the children of a node on its first expansion.
    ///
    /// The returned future must not borrow the tree; copy what it needs
    /// (key, path) out of the [`NodeRef`] before building it.
    pub fn lazy_load<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(NodeRef<'_>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = LoadResult> + Send + 'static,
    {
        self.config.lazy_load = Some(Arc::new(move |node: NodeRef<'_>| f(node).boxed()));
        self
    }

    pub fn lazy_load_failure<F>(mut self, f: F) -> Self
    where
        F: Fn(NodeRef<'_>, &HookError) -> bool + Send + Sync + 'static,
    {
        self.config.lazy_load_failure = Some(Arc::new(f));
        self
    }

    /// Hook awaited before every search; it returns the subtrees that must
    /// exist for the search to be accurate.
    pub fn remote_search<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(&str, NodeRef<'_>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RemoteSearchResult> + Send + 'static,
    {
        self.config.remote_search = Some(Arc::new(
            move |query: &str, node: NodeRef<'_>| f(query, node).boxed(),
        ));
        self
    }

    pub fn sort<F>(mut self, f: F) -> Self
    where
        F: Fn(NodeRef<'_>, NodeRef<'_>) -> Ordering + Send + Sync + 'static,
    {
        self.config.sort = Some(Arc::new(f));
        self
    }

    pub fn filter<F>(mut self, f: F) -> Self
    where
        F: Fn(NodeRef<'_>) -> bool + Send + Sync + 'static,
    {
        self.config.filter = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> TreeConfig {
        self.config
    }
}
