//! An optic wrapper that logs every read and write.

use std::fmt;

use super::Optic;

/// Wraps an optic and emits a `trace`-level event for each `get` and `put`.
///
/// Built with [`Optic::traced`]. Values are recorded with their `Debug`
/// representation.
#[derive(Clone, Copy)]
pub struct Traced<O> {
    optic: O,
    name: &'static str,
}

impl<O> Traced<O> {
    /// Wraps `optic` under `name`.
    #[must_use]
    pub const fn new(optic: O, name: &'static str) -> Self {
        Self { optic, name }
    }

    /// Returns the name recorded on each event.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<S, T, O> Optic<S, T> for Traced<O>
where
    S: fmt::Debug,
    T: fmt::Debug,
    O: Optic<S, T>,
{
    fn get(&self, source: &S) -> T {
        let target = self.optic.get(source);
        tracing::trace!(optic = self.name, ?source, ?target, "get");
        target
    }

    fn put(&self, source: S, target: T) -> S {
        tracing::trace!(optic = self.name, ?source, ?target, "put");
        let updated = self.optic.put(source, target);
        tracing::trace!(optic = self.name, ?updated, "put done");
        updated
    }
}

impl<O: fmt::Debug> fmt::Debug for Traced<O> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Traced")
            .field("name", &self.name)
            .field("optic", &self.optic)
            .finish()
    }
}
