//! Asynchronous view nodes.

use std::fmt;
use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use thiserror::Error;

use super::ViewNode;

/// The rejection value of a [`Loader`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LoadError {
    message: String,
}

impl LoadError {
    /// Creates a load error carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Converts the rejection into the node delivered to `put` in place of
    /// a resolved value.
    #[must_use]
    pub fn into_node(self) -> ViewNode {
        ViewNode::Preformatted(self.message)
    }
}

/// The outcome of a [`Loader`].
pub type LoadResult = Result<ViewNode, LoadError>;

type Factory = dyn Fn() -> LocalBoxFuture<'static, LoadResult>;

/// A placeholder node whose content resolves asynchronously.
///
/// A loader holds a factory rather than a future, so every mount starts a
/// fresh load. Two loaders are equal only when they share the same factory.
#[derive(Clone)]
pub struct Loader {
    factory: Rc<Factory>,
}

impl Loader {
    /// Creates a loader from a function starting the load.
    pub fn new<F, Fut>(factory: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = LoadResult> + 'static,
    {
        Self {
            factory: Rc::new(move || factory().boxed_local()),
        }
    }

    /// Creates a loader that resolves to `node` on first poll.
    pub fn ready(node: ViewNode) -> Self {
        Self::new(move || futures::future::ready(Ok(node.clone())))
    }

    /// Starts a new load.
    pub fn start(&self) -> LocalBoxFuture<'static, LoadResult> {
        (self.factory)()
    }
}

impl PartialEq for Loader {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.factory, &other.factory)
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Loader").finish_non_exhaustive()
    }
}
