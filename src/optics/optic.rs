//! The `Optic` trait and its basic implementations.
//!
//! An optic is a bidirectional function between a source type `S` and a
//! target type `T`:
//!
//! - `get` projects the target out of a source
//! - `put` takes an original source and an edited target and returns the
//!   updated source
//!
//! # Laws
//!
//! A well-behaved optic satisfies:
//!
//! 1. **`GetPut`**: `put(s, get(s)) == s`
//! 2. **`PutGet`**: `get(put(s, t)) == t`
//! 3. **`PutPut`**: `put(put(s, t1), t2) == put(s, t2)`
//!
//! Action optics built with [`Optic::update`] and [`Optic::set`] break
//! `PutGet` on purpose: writing `true` through them performs an effect on the
//! source and reads back `false`.
//!
//! # Example
//!
//! ```
//! use mag::optics::{optic, Optic};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Point { x: i32, y: i32 }
//!
//! let x = optic(|p: &Point| p.x, |p: Point, x: i32| Point { x, ..p });
//! let point = Point { x: 1, y: 2 };
//!
//! assert_eq!(x.get(&point), 1);
//! assert_eq!(x.put(point, 10), Point { x: 10, y: 2 });
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use super::choice::Recover;
use super::collection::{Each, Zip};
use super::combinator::{Action, Assign, Guard, Involution, Projection};
use super::record::{Defaulted, Pick, Record};
use super::traced::Traced;

/// A bidirectional function between a source `S` and a target `T`.
///
/// Every optic in this crate implements this trait. Composition, record
/// projection, dispatch over enums and the view adapters are all built from
/// it, so any type that can say how to read and how to write back a piece of
/// data can take part in a view.
///
/// # Type Parameters
///
/// - `S`: The source type
/// - `T`: The target type
pub trait Optic<S, T> {
    /// Projects the target out of the source.
    fn get(&self, source: &S) -> T;

    /// Writes an edited target back into the source.
    ///
    /// # Arguments
    ///
    /// * `source` - The source the edit applies to
    /// * `target` - The edited target
    ///
    /// # Returns
    ///
    /// The updated source.
    fn put(&self, source: S, target: T) -> S;

    /// Reads the target, transforms it, and writes it back.
    fn modify<F>(&self, source: S, function: F) -> S
    where
        Self: Sized,
        F: FnOnce(T) -> T,
    {
        let target = self.get(&source);
        self.put(source, function(target))
    }

    /// Composes with an inner optic: `S -> T` then `T -> U`.
    ///
    /// # Example
    ///
    /// ```
    /// use mag::optics::{optic, Optic};
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Inner { value: i32 }
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Outer { inner: Inner }
    ///
    /// let inner = optic(|o: &Outer| o.inner.clone(), |_o: Outer, inner: Inner| Outer { inner });
    /// let value = optic(|i: &Inner| i.value, |_i: Inner, value: i32| Inner { value });
    /// let composed = inner.to(value);
    ///
    /// let outer = Outer { inner: Inner { value: 1 } };
    /// assert_eq!(composed.get(&outer), 1);
    /// assert_eq!(composed.put(outer, 7).inner.value, 7);
    /// ```
    fn to<U, O>(self, inner: O) -> Composed<Self, O, T>
    where
        Self: Sized,
        O: Optic<T, U>,
    {
        Composed::new(self, inner)
    }

    /// Composes with a constant: the result always reads `value` and ignores
    /// writes.
    fn to_constant<U>(self, value: U) -> Composed<Self, Constant<U>, T>
    where
        Self: Sized,
        U: Clone,
    {
        Composed::new(self, Constant::new(value))
    }

    /// Composes with an inner optic produced by `build`, which receives this
    /// optic so the inner one can be derived from it.
    fn to_with<U, O, F>(self, build: F) -> Composed<Self, O, T>
    where
        Self: Sized,
        O: Optic<T, U>,
        F: FnOnce(&Self) -> O,
    {
        let inner = build(&self);
        Composed::new(self, inner)
    }

    /// Composes with an outer optic: `R -> S` then `S -> T`.
    ///
    /// `a.of(b)` is the same optic as `b.to(a)`.
    fn of<R, O>(self, outer: O) -> Composed<O, Self, S>
    where
        Self: Sized,
        O: Optic<R, S>,
    {
        Composed::new(outer, self)
    }

    /// Feeds a constant source into this optic, whatever the outer source is.
    fn of_constant(self, value: S) -> Composed<Constant<S>, Self, S>
    where
        Self: Sized,
        S: Clone,
    {
        Composed::new(Constant::new(value), self)
    }

    /// Composes with an outer optic produced by `build`.
    fn of_with<R, O, F>(self, build: F) -> Composed<O, Self, S>
    where
        Self: Sized,
        O: Optic<R, S>,
        F: FnOnce(&Self) -> O,
    {
        let outer = build(&self);
        Composed::new(outer, self)
    }

    /// Narrows the target through a read-only projection.
    ///
    /// Writes through the result leave the source unchanged.
    fn view<U, F>(self, function: F) -> Composed<Self, Projection<F>, T>
    where
        Self: Sized,
        F: Fn(&T) -> U,
    {
        Composed::new(self, Projection::new(function))
    }

    /// Maps the target through an involution, a function that is its own
    /// inverse, in both directions.
    fn involute<F>(self, function: F) -> Composed<Self, Involution<F>, T>
    where
        Self: Sized,
        F: Fn(&T) -> T,
    {
        Composed::new(self, Involution::new(function))
    }

    /// Rejects writes whose target fails `predicate`.
    fn guard<P>(self, predicate: P) -> Composed<Self, Guard<P>, T>
    where
        Self: Sized,
        P: Fn(&T) -> bool,
    {
        Composed::new(self, Guard::new(predicate))
    }

    /// Turns the target into a trigger: writing `true` applies `function` to
    /// it, and the optic always reads `false`.
    fn update<F>(self, function: F) -> Composed<Self, Action<F>, T>
    where
        Self: Sized,
        F: Fn(T) -> T,
    {
        Composed::new(self, Action::new(function))
    }

    /// Turns the target into a trigger that stores `value` when `true` is
    /// written.
    fn set(self, value: T) -> Composed<Self, Assign<T>, T>
    where
        Self: Sized,
        T: Clone,
    {
        Composed::new(self, Assign::new(value))
    }

    /// Lifts an element optic over a `Vec` target.
    ///
    /// A target of the wrong length is truncated to the shorter of the two
    /// sequences on write.
    fn map<E, U, O>(self, element: O) -> Composed<Self, Each<O>, T>
    where
        Self: Sized,
        O: Optic<E, U>,
    {
        Composed::new(self, Each::new(element))
    }

    /// Pairs this optic with another over the same source.
    fn zip<U, O>(self, other: O) -> Zip<Self, O>
    where
        Self: Sized,
        O: Optic<S, U>,
    {
        Zip::new(self, other)
    }

    /// Projects a record target onto the listed fields.
    fn pick(self, fields: &[<T as Record>::Field]) -> Composed<Self, Pick<T>, T>
    where
        Self: Sized,
        T: Record,
    {
        Composed::new(self, Pick::new(fields))
    }

    /// Projects a record target onto every field except the listed ones.
    fn omit(self, fields: &[<T as Record>::Field]) -> Composed<Self, Pick<T>, T>
    where
        Self: Sized,
        T: Record,
    {
        Composed::new(self, Pick::omitting(fields))
    }

    /// Accepts a partial or absent source, filling missing fields from
    /// `fallback` before this optic reads it.
    fn default(self, fallback: S) -> Composed<Defaulted<S>, Self, S>
    where
        Self: Sized,
        S: Record + Clone,
    {
        Composed::new(Defaulted::new(fallback), self)
    }

    /// Folds a fallible target into a plain one.
    ///
    /// `Ok` values pass through; `Err` values are replaced by `function`'s
    /// output on read and kept on write.
    fn recover<A, E, F>(self, function: F) -> Composed<Self, Recover<F>, T>
    where
        Self: Sized,
        F: Fn(&E) -> A,
    {
        Composed::new(self, Recover::new(function))
    }

    /// Wraps this optic so that every `get` and `put` emits a `tracing` event.
    fn traced(self, name: &'static str) -> Traced<Self>
    where
        Self: Sized,
    {
        Traced::new(self, name)
    }

    /// Erases the concrete type behind a shared pointer.
    fn boxed(self) -> BoxedOptic<S, T>
    where
        Self: Sized + 'static,
    {
        Rc::new(self)
    }
}

/// A type-erased, cheaply cloneable optic.
pub type BoxedOptic<S, T> = Rc<dyn Optic<S, T>>;

impl<S, T, O> Optic<S, T> for Rc<O>
where
    O: Optic<S, T> + ?Sized,
{
    #[inline]
    fn get(&self, source: &S) -> T {
        (**self).get(source)
    }

    #[inline]
    fn put(&self, source: S, target: T) -> S {
        (**self).put(source, target)
    }
}

// =============================================================================
// FunctionOptic
// =============================================================================

/// An optic built from a getter and a putter function.
///
/// `put` returns the source untouched when the edited target equals what
/// `get` reads from it, so an unedited subtree keeps its value.
///
/// # Type Parameters
///
/// - `S`: The source type
/// - `T`: The target type
/// - `G`: The getter function type
/// - `P`: The putter function type
pub struct FunctionOptic<S, T, G, P>
where
    G: Fn(&S) -> T,
    P: Fn(S, T) -> S,
{
    getter: G,
    putter: P,
    _marker: PhantomData<fn(S) -> T>,
}

impl<S, T, G, P> FunctionOptic<S, T, G, P>
where
    G: Fn(&S) -> T,
    P: Fn(S, T) -> S,
{
    /// Creates a new `FunctionOptic` from getter and putter functions.
    #[must_use]
    pub const fn new(getter: G, putter: P) -> Self {
        Self {
            getter,
            putter,
            _marker: PhantomData,
        }
    }
}

impl<S, T, G, P> Optic<S, T> for FunctionOptic<S, T, G, P>
where
    G: Fn(&S) -> T,
    P: Fn(S, T) -> S,
    T: PartialEq,
{
    #[inline]
    fn get(&self, source: &S) -> T {
        (self.getter)(source)
    }

    fn put(&self, source: S, target: T) -> S {
        if (self.getter)(&source) == target {
            source
        } else {
            (self.putter)(source, target)
        }
    }
}

impl<S, T, G, P> Clone for FunctionOptic<S, T, G, P>
where
    G: Fn(&S) -> T + Clone,
    P: Fn(S, T) -> S + Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.getter.clone(), self.putter.clone())
    }
}

impl<S, T, G, P> fmt::Debug for FunctionOptic<S, T, G, P>
where
    G: Fn(&S) -> T,
    P: Fn(S, T) -> S,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("FunctionOptic").finish_non_exhaustive()
    }
}

/// Creates a [`FunctionOptic`] from a getter and a putter.
#[must_use]
pub const fn optic<S, T, G, P>(getter: G, putter: P) -> FunctionOptic<S, T, G, P>
where
    G: Fn(&S) -> T,
    P: Fn(S, T) -> S,
{
    FunctionOptic::new(getter, putter)
}

// =============================================================================
// Identity and Constant
// =============================================================================

/// The identity optic: reads the whole source and replaces it on write.
pub struct Identity<S>(PhantomData<fn(S) -> S>);

impl<S> Identity<S> {
    /// Creates the identity optic.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<S> Default for Identity<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for Identity<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Identity<S> {}

impl<S> fmt::Debug for Identity<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Identity")
    }
}

impl<S: Clone> Optic<S, S> for Identity<S> {
    #[inline]
    fn get(&self, source: &S) -> S {
        source.clone()
    }

    #[inline]
    fn put(&self, _source: S, target: S) -> S {
        target
    }
}

/// Creates the identity optic.
#[must_use]
pub const fn identity<S>() -> Identity<S> {
    Identity::new()
}

/// An optic that always reads the same value and ignores writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant<T> {
    value: T,
}

impl<T> Constant<T> {
    /// Creates a constant optic reading `value`.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self { value }
    }
}

impl<S, T: Clone> Optic<S, T> for Constant<T> {
    #[inline]
    fn get(&self, _source: &S) -> T {
        self.value.clone()
    }

    #[inline]
    fn put(&self, source: S, _target: T) -> S {
        source
    }
}

/// Creates a [`Constant`] optic.
#[must_use]
pub const fn constant<T>(value: T) -> Constant<T> {
    Constant::new(value)
}

// =============================================================================
// Composed
// =============================================================================

/// The composition of two optics.
///
/// Given `outer: Optic<S, A>` and `inner: Optic<A, B>`, this optic has type
/// `Optic<S, B>`. Writing re-reads the intermediate value from the current
/// source, puts the edit into it with `inner`, then writes it back with
/// `outer`.
///
/// # Type Parameters
///
/// - `O1`: The outer optic
/// - `O2`: The inner optic
/// - `A`: The intermediate type
pub struct Composed<O1, O2, A> {
    outer: O1,
    inner: O2,
    _marker: PhantomData<fn() -> A>,
}

impl<O1, O2, A> Composed<O1, O2, A> {
    /// Creates a new composed optic.
    #[must_use]
    pub const fn new(outer: O1, inner: O2) -> Self {
        Self {
            outer,
            inner,
            _marker: PhantomData,
        }
    }

    /// Returns the outer optic.
    pub const fn outer(&self) -> &O1 {
        &self.outer
    }

    /// Returns the inner optic.
    pub const fn inner(&self) -> &O2 {
        &self.inner
    }
}

impl<S, A, B, O1, O2> Optic<S, B> for Composed<O1, O2, A>
where
    O1: Optic<S, A>,
    O2: Optic<A, B>,
{
    #[inline]
    fn get(&self, source: &S) -> B {
        self.inner.get(&self.outer.get(source))
    }

    fn put(&self, source: S, target: B) -> S {
        let intermediate = self.outer.get(&source);
        let edited = self.inner.put(intermediate, target);
        self.outer.put(source, edited)
    }
}

impl<O1: Clone, O2: Clone, A> Clone for Composed<O1, O2, A> {
    fn clone(&self) -> Self {
        Self::new(self.outer.clone(), self.inner.clone())
    }
}

impl<O1: fmt::Debug, O2: fmt::Debug, A> fmt::Debug for Composed<O1, O2, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Composed")
            .field("outer", &self.outer)
            .field("inner", &self.inner)
            .finish()
    }
}
