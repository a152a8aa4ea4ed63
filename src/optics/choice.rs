//! Optics over enums.
//!
//! An enum whose variants are told apart by a tag implements [`Choice`],
//! normally through `#[derive(Choice)]`. For each variant the derive also
//! generates a [`Case`], the pair of functions that recognise the variant and
//! build it back from its payload.
//!
//! Two ways of dispatching on the active variant are offered:
//!
//! - The derive generates an exhaustive `choice(...)` constructor taking one
//!   handler optic per variant. A missing handler is a compile error.
//! - [`Match`] collects cases at run time. Its target is
//!   `Result<T, DispatchError>` and reads
//!   [`DispatchError::Unhandled`] when the active tag has no case. Use
//!   [`Optic::recover`] to fold the error into a plain value.
//!
//! # Example
//!
//! ```
//! use mag::optics::{optic, Choice, Match, Optic};
//!
//! #[derive(Clone, Debug, PartialEq, Choice)]
//! enum Shape {
//!     Circle(f64),
//!     Square(f64),
//! }
//!
//! let describe = Match::<Shape, String>::new()
//!     .case(
//!         Shape::circle_case(),
//!         optic(|r: &f64| format!("circle {r}"), |r: f64, _s: String| r),
//!     );
//!
//! assert_eq!(describe.get(&Shape::Circle(1.0)), Ok("circle 1".to_string()));
//! assert!(describe.get(&Shape::Square(2.0)).is_err());
//! ```

use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use super::Optic;

/// An enum whose active variant is identified by a static tag.
pub trait Choice: Sized {
    /// Every variant tag, in declaration order.
    const TAGS: &'static [&'static str];

    /// Returns the tag of the active variant.
    fn tag(&self) -> &'static str;
}

/// Errors produced when dispatching on a [`Choice`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The active variant has no registered case.
    #[error("no case registered for variant `{tag}` of `{type_name}`")]
    Unhandled {
        /// The dispatched type.
        type_name: &'static str,
        /// The tag of the active variant.
        tag: &'static str,
    },
}

// =============================================================================
// Case
// =============================================================================

/// Recognises one variant of `S` and rebuilds it from a payload `A`.
///
/// - `preview` returns the payload when the source is this variant
/// - `review` builds the variant from a payload
pub struct Case<S, A> {
    tag: &'static str,
    preview: Rc<dyn Fn(&S) -> Option<A>>,
    review: Rc<dyn Fn(A) -> S>,
}

impl<S, A> Case<S, A> {
    /// Creates a case from its tag and its preview and review functions.
    #[must_use]
    pub fn new<P, R>(tag: &'static str, preview: P, review: R) -> Self
    where
        P: Fn(&S) -> Option<A> + 'static,
        R: Fn(A) -> S + 'static,
    {
        Self {
            tag,
            preview: Rc::new(preview),
            review: Rc::new(review),
        }
    }

    /// Returns the tag of the variant this case recognises.
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    /// Returns the payload if `source` is this variant.
    pub fn preview(&self, source: &S) -> Option<A> {
        (self.preview)(source)
    }

    /// Builds the variant from a payload.
    pub fn review(&self, payload: A) -> S {
        (self.review)(payload)
    }

    /// Returns `true` if `source` is this variant.
    pub fn matches(&self, source: &S) -> bool {
        self.preview(source).is_some()
    }

    /// Turns this case into an injection optic from payload to enum.
    #[must_use]
    pub fn inject(self) -> Inject<S, A> {
        Inject { case: self }
    }
}

impl<S, A> Clone for Case<S, A> {
    fn clone(&self) -> Self {
        Self {
            tag: self.tag,
            preview: Rc::clone(&self.preview),
            review: Rc::clone(&self.review),
        }
    }
}

impl<S, A> fmt::Debug for Case<S, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Case")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// An optic from a payload `A` to the enum variant that carries it.
///
/// `get` wraps the payload in the variant. `put` extracts the payload from
/// an edited enum value; when the edited value is a different variant the
/// original payload is kept.
pub struct Inject<S, A> {
    case: Case<S, A>,
}

impl<S, A> Inject<S, A> {
    /// Returns the underlying case.
    pub const fn case(&self) -> &Case<S, A> {
        &self.case
    }
}

impl<S, A: Clone> Optic<A, S> for Inject<S, A> {
    #[inline]
    fn get(&self, source: &A) -> S {
        self.case.review(source.clone())
    }

    #[inline]
    fn put(&self, source: A, target: S) -> A {
        self.case.preview(&target).unwrap_or(source)
    }
}

impl<S, A> Clone for Inject<S, A> {
    fn clone(&self) -> Self {
        Self {
            case: self.case.clone(),
        }
    }
}

impl<S, A> fmt::Debug for Inject<S, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Inject")
            .field("tag", &self.case.tag)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Match
// =============================================================================

trait Branch<S, T> {
    fn tag(&self) -> &'static str;

    fn try_get(&self, source: &S) -> Option<T>;

    fn try_put(&self, source: &S, target: T) -> Result<S, T>;
}

struct CaseBranch<S, A, H> {
    case: Case<S, A>,
    handler: H,
}

impl<S, A, T, H> Branch<S, T> for CaseBranch<S, A, H>
where
    H: Optic<A, T>,
{
    fn tag(&self) -> &'static str {
        self.case.tag
    }

    fn try_get(&self, source: &S) -> Option<T> {
        self.case
            .preview(source)
            .map(|payload| self.handler.get(&payload))
    }

    fn try_put(&self, source: &S, target: T) -> Result<S, T> {
        match self.case.preview(source) {
            Some(payload) => Ok(self.case.review(self.handler.put(payload, target))),
            None => Err(target),
        }
    }
}

/// Dispatches on the active variant of `S` through registered cases.
///
/// Cases are tried in registration order and the first one whose variant
/// matches wins; later cases for the same variant are never consulted.
///
/// - `get` reads `Err(DispatchError::Unhandled)` when no case matches
/// - `put` of `Ok(target)` re-dispatches on the source and writes through
///   the matching handler; with no matching case the source is kept and a
///   warning is logged
/// - `put` of `Err(_)` keeps the source
///
/// `put` has to return a source, so it cannot report the dispatch error.
/// [`try_put`](Match::try_put) is the fallible form and returns the same
/// `DispatchError` that `get` reads.
pub struct Match<S, T> {
    branches: Vec<Rc<dyn Branch<S, T>>>,
}

impl<S, T> Match<S, T> {
    /// Creates a `Match` with no cases.
    #[must_use]
    pub fn new() -> Self {
        Self {
            branches: Vec::new(),
        }
    }

    /// Registers a case with the optic handling its payload.
    #[must_use]
    pub fn case<A, H>(mut self, case: Case<S, A>, handler: H) -> Self
    where
        S: 'static,
        A: 'static,
        T: 'static,
        H: Optic<A, T> + 'static,
    {
        self.branches.push(Rc::new(CaseBranch { case, handler }));
        self
    }

    /// Returns the registered tags, in registration order.
    pub fn tags(&self) -> Vec<&'static str> {
        self.branches.iter().map(|branch| branch.tag()).collect()
    }
}

impl<S, T> Default for Match<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, T> Clone for Match<S, T> {
    fn clone(&self) -> Self {
        Self {
            branches: self.branches.clone(),
        }
    }
}

impl<S, T> fmt::Debug for Match<S, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Match")
            .field("tags", &self.tags())
            .finish()
    }
}

impl<S: Choice, T> Optic<S, Result<T, DispatchError>> for Match<S, T> {
    fn get(&self, source: &S) -> Result<T, DispatchError> {
        self.branches
            .iter()
            .find_map(|branch| branch.try_get(source))
            .ok_or_else(|| DispatchError::Unhandled {
                type_name: std::any::type_name::<S>(),
                tag: source.tag(),
            })
    }

    fn put(&self, source: S, target: Result<T, DispatchError>) -> S {
        let Ok(target) = target else {
            return source;
        };
        match self.try_put(&source, target) {
            Ok(updated) => updated,
            Err(error) => {
                tracing::warn!(%error, "no case matches the active variant, edit dropped");
                source
            }
        }
    }
}

impl<S: Choice, T> Match<S, T> {
    /// Writes `target` through the case matching the active variant.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Unhandled`] when no registered case matches
    /// the variant of `source`.
    pub fn try_put(&self, source: &S, target: T) -> Result<S, DispatchError> {
        let mut target = target;
        for branch in &self.branches {
            match branch.try_put(source, target) {
                Ok(updated) => return Ok(updated),
                Err(unused) => target = unused,
            }
        }
        Err(DispatchError::Unhandled {
            type_name: std::any::type_name::<S>(),
            tag: source.tag(),
        })
    }
}

/// Folds a `Result` target into a plain value.
///
/// `get` reads `Ok` values as is and maps `Err` values through the recovery
/// function. `put` writes into `Ok` sources and keeps `Err` sources.
#[derive(Clone, Copy)]
pub struct Recover<F> {
    function: F,
}

impl<F> Recover<F> {
    /// Creates a recovering optic.
    #[must_use]
    pub const fn new(function: F) -> Self {
        Self { function }
    }
}

impl<A, E, F> Optic<Result<A, E>, A> for Recover<F>
where
    A: Clone,
    F: Fn(&E) -> A,
{
    fn get(&self, source: &Result<A, E>) -> A {
        match source {
            Ok(value) => value.clone(),
            Err(error) => (self.function)(error),
        }
    }

    fn put(&self, source: Result<A, E>, target: A) -> Result<A, E> {
        match source {
            Ok(_) => Ok(target),
            Err(error) => Err(error),
        }
    }
}

impl<F> fmt::Debug for Recover<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Recover").finish_non_exhaustive()
    }
}
