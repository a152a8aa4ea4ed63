//! Optics over several targets at once.
//!
//! - [`Each`] lifts an element optic over a `Vec`
//! - [`Zip`] pairs two optics over the same source
//! - [`Gather`] collects any number of same-typed optics into a `Vec`
//!
//! Writing through [`Zip`] and [`Gather`] compares every entry of the edited
//! target with what was read from the original source and only puts the
//! entries that changed. Each put sees the source produced by the previous
//! one, so independent edits accumulate.

use std::fmt;

use super::{BoxedOptic, Optic};

/// Applies an element optic to every element of a `Vec`.
///
/// `put` pairs elements by index. When the target and the source differ in
/// length, the result is truncated to the shorter of the two.
#[derive(Clone, Copy)]
pub struct Each<O> {
    element: O,
}

impl<O> Each<O> {
    /// Creates an `Each` over an element optic.
    #[must_use]
    pub const fn new(element: O) -> Self {
        Self { element }
    }
}

impl<E, U, O> Optic<Vec<E>, Vec<U>> for Each<O>
where
    O: Optic<E, U>,
{
    fn get(&self, source: &Vec<E>) -> Vec<U> {
        source.iter().map(|item| self.element.get(item)).collect()
    }

    fn put(&self, source: Vec<E>, target: Vec<U>) -> Vec<E> {
        source
            .into_iter()
            .zip(target)
            .map(|(item, edited)| self.element.put(item, edited))
            .collect()
    }
}

impl<O: fmt::Debug> fmt::Debug for Each<O> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Each")
            .field("element", &self.element)
            .finish()
    }
}

/// Two optics over the same source, read as a pair.
#[derive(Clone, Copy)]
pub struct Zip<O1, O2> {
    first: O1,
    second: O2,
}

impl<O1, O2> Zip<O1, O2> {
    /// Creates a zipped optic.
    #[must_use]
    pub const fn new(first: O1, second: O2) -> Self {
        Self { first, second }
    }
}

impl<S, A, B, O1, O2> Optic<S, (A, B)> for Zip<O1, O2>
where
    O1: Optic<S, A>,
    O2: Optic<S, B>,
    A: PartialEq,
    B: PartialEq,
{
    fn get(&self, source: &S) -> (A, B) {
        (self.first.get(source), self.second.get(source))
    }

    fn put(&self, source: S, target: (A, B)) -> S {
        let (original_first, original_second) = self.get(&source);
        let (first, second) = target;
        let source = if first == original_first {
            source
        } else {
            self.first.put(source, first)
        };
        if second == original_second {
            source
        } else {
            self.second.put(source, second)
        }
    }
}

impl<O1: fmt::Debug, O2: fmt::Debug> fmt::Debug for Zip<O1, O2> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Zip")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

/// A sequence of optics over the same source, read as a `Vec`.
///
/// Usually built with the [`gather!`](crate::gather) macro.
pub struct Gather<S, T> {
    optics: Vec<BoxedOptic<S, T>>,
}

impl<S, T> Gather<S, T> {
    /// Creates a `Gather` from boxed optics.
    #[must_use]
    pub const fn new(optics: Vec<BoxedOptic<S, T>>) -> Self {
        Self { optics }
    }

    /// Returns the number of gathered optics.
    pub fn len(&self) -> usize {
        self.optics.len()
    }

    /// Returns `true` if no optic is gathered.
    pub fn is_empty(&self) -> bool {
        self.optics.is_empty()
    }
}

impl<S, T: PartialEq> Optic<S, Vec<T>> for Gather<S, T> {
    fn get(&self, source: &S) -> Vec<T> {
        self.optics.iter().map(|optic| optic.get(source)).collect()
    }

    fn put(&self, source: S, target: Vec<T>) -> S {
        let originals = self.get(&source);
        self.optics
            .iter()
            .zip(originals)
            .zip(target)
            .fold(source, |source, ((optic, original), edited)| {
                if edited == original {
                    source
                } else {
                    optic.put(source, edited)
                }
            })
    }
}

impl<S, T> Clone for Gather<S, T> {
    fn clone(&self) -> Self {
        Self {
            optics: self.optics.clone(),
        }
    }
}

impl<S, T> fmt::Debug for Gather<S, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Gather")
            .field("len", &self.optics.len())
            .finish_non_exhaustive()
    }
}

/// Builds a [`Gather`] from a list of optics with the same source and target.
///
/// # Example
///
/// ```
/// use mag::gather;
/// use mag::optics::{optic, Optic};
///
/// let first = optic(|pair: &(i32, i32)| pair.0, |pair: (i32, i32), value: i32| (value, pair.1));
/// let second = optic(|pair: &(i32, i32)| pair.1, |pair: (i32, i32), value: i32| (pair.0, value));
/// let both = gather![first, second];
///
/// assert_eq!(both.get(&(1, 2)), vec![1, 2]);
/// assert_eq!(both.put((1, 2), vec![1, 5]), (1, 5));
/// ```
#[macro_export]
macro_rules! gather {
    ($($optic:expr),* $(,)?) => {
        $crate::optics::Gather::new(vec![$($crate::optics::Optic::boxed($optic)),*])
    };
}
