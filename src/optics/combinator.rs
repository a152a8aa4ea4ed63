//! Small single-purpose optics used by the [`Optic`] combinator methods.
//!
//! - [`Projection`]: read-only narrowing, writes are dropped
//! - [`Involution`]: a self-inverse function applied in both directions
//! - [`Guard`]: writes that fail a predicate are dropped
//! - [`Action`] and [`Assign`]: boolean triggers that perform an update

use std::fmt;

use super::Optic;

/// A read-only optic over a projection function.
///
/// `put` returns the source unchanged, so `PutGet` only holds for targets
/// equal to the current projection.
#[derive(Clone, Copy)]
pub struct Projection<F> {
    function: F,
}

impl<F> Projection<F> {
    /// Creates a projection optic.
    #[must_use]
    pub const fn new(function: F) -> Self {
        Self { function }
    }
}

impl<A, U, F> Optic<A, U> for Projection<F>
where
    F: Fn(&A) -> U,
{
    #[inline]
    fn get(&self, source: &A) -> U {
        (self.function)(source)
    }

    #[inline]
    fn put(&self, source: A, _target: U) -> A {
        source
    }
}

impl<F> fmt::Debug for Projection<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Projection").finish_non_exhaustive()
    }
}

/// An optic applying an involution in both directions.
///
/// The function must be its own inverse (`f(f(x)) == x`) for the optic to
/// be lawful. Negation and boolean `not` are typical.
#[derive(Clone, Copy)]
pub struct Involution<F> {
    function: F,
}

impl<F> Involution<F> {
    /// Creates an involution optic.
    #[must_use]
    pub const fn new(function: F) -> Self {
        Self { function }
    }
}

impl<A, F> Optic<A, A> for Involution<F>
where
    F: Fn(&A) -> A,
{
    #[inline]
    fn get(&self, source: &A) -> A {
        (self.function)(source)
    }

    #[inline]
    fn put(&self, _source: A, target: A) -> A {
        (self.function)(&target)
    }
}

impl<F> fmt::Debug for Involution<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Involution").finish_non_exhaustive()
    }
}

/// An identity optic that refuses targets failing a predicate.
#[derive(Clone, Copy)]
pub struct Guard<P> {
    predicate: P,
}

impl<P> Guard<P> {
    /// Creates a guard optic.
    #[must_use]
    pub const fn new(predicate: P) -> Self {
        Self { predicate }
    }
}

impl<A, P> Optic<A, A> for Guard<P>
where
    A: Clone,
    P: Fn(&A) -> bool,
{
    #[inline]
    fn get(&self, source: &A) -> A {
        source.clone()
    }

    fn put(&self, source: A, target: A) -> A {
        if (self.predicate)(&target) {
            target
        } else {
            source
        }
    }
}

impl<P> fmt::Debug for Guard<P> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Guard").finish_non_exhaustive()
    }
}

/// A trigger optic: reads `false`, and writing `true` applies an update.
///
/// This is the shape buttons expect. Writing `false` leaves the source
/// unchanged.
#[derive(Clone, Copy)]
pub struct Action<F> {
    function: F,
}

impl<F> Action<F> {
    /// Creates an action optic.
    #[must_use]
    pub const fn new(function: F) -> Self {
        Self { function }
    }
}

impl<A, F> Optic<A, bool> for Action<F>
where
    F: Fn(A) -> A,
{
    #[inline]
    fn get(&self, _source: &A) -> bool {
        false
    }

    fn put(&self, source: A, target: bool) -> A {
        if target {
            (self.function)(source)
        } else {
            source
        }
    }
}

impl<F> fmt::Debug for Action<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Action").finish_non_exhaustive()
    }
}

/// A trigger optic that stores a fixed value when `true` is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assign<T> {
    value: T,
}

impl<T> Assign<T> {
    /// Creates an assigning trigger.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Clone> Optic<T, bool> for Assign<T> {
    #[inline]
    fn get(&self, _source: &T) -> bool {
        false
    }

    fn put(&self, source: T, target: bool) -> T {
        if target { self.value.clone() } else { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::identity;
    use rstest::rstest;

    #[rstest]
    fn projection_drops_writes() {
        let length = identity::<String>().view(String::len);
        assert_eq!(length.get(&"four".to_string()), 4);
        assert_eq!(length.put("four".to_string(), 99), "four");
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn involution_round_trips(#[case] flag: bool) {
        let negated = identity::<bool>().involute(|value: &bool| !value);
        assert_eq!(negated.get(&flag), !flag);
        assert_eq!(negated.put(flag, !flag), flag);
    }

    #[rstest]
    #[case(5, 5)]
    #[case(-1, 3)]
    fn guard_keeps_source_when_predicate_fails(#[case] target: i32, #[case] expected: i32) {
        let positive = identity::<i32>().guard(|value: &i32| *value >= 0);
        assert_eq!(positive.put(3, target), expected);
    }

    #[rstest]
    fn action_applies_update_on_true_only() {
        let increment = identity::<i32>().update(|value| value + 1);
        assert!(!increment.get(&0));
        assert_eq!(increment.put(0, true), 1);
        assert_eq!(increment.put(0, false), 0);
    }

    #[rstest]
    fn assign_stores_value_on_true() {
        let reset = identity::<i32>().set(0);
        assert!(!reset.get(&12));
        assert_eq!(reset.put(12, true), 0);
        assert_eq!(reset.put(12, false), 12);
    }
}
