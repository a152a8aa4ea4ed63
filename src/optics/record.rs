//! Record optics: field access, field subsets, and default filling.
//!
//! A record is a struct whose fields can be addressed by name. The
//! [`Record`] trait, normally implemented with `#[derive(Record)]`, gives
//! each struct:
//!
//! - a `Field` enum naming its fields
//! - a `Partial` companion struct where every field is optional
//!
//! On top of that this module provides:
//!
//! - [`FieldOptic`]: focuses on one field (see also the [`field!`](crate::field) macro)
//! - [`Pick`]: projects onto a subset of fields, as a `Partial`
//! - [`Defaulted`]: reads a `Partial` or absent source, filling gaps from a fallback
//!
//! # Example
//!
//! ```
//! use mag::optics::{Optic, Record};
//!
//! #[derive(Clone, Debug, PartialEq, Record)]
//! struct Settings {
//!     volume: u8,
//!     muted: bool,
//! }
//!
//! let settings = Settings { volume: 3, muted: false };
//! let volume = Settings::volume_optic();
//! assert_eq!(volume.get(&settings), 3);
//!
//! let picked = mag::optics::identity::<Settings>().pick(&[SettingsField::Muted]);
//! let partial = picked.get(&settings);
//! assert_eq!(partial.muted, Some(false));
//! assert_eq!(partial.volume, None);
//! ```

use std::fmt;
use std::marker::PhantomData;

use smallvec::SmallVec;

use super::Optic;

/// A struct with named, individually addressable fields.
///
/// Implement it with `#[derive(Record)]`; hand-written implementations must
/// keep `select`, `merge` and `into_partial` consistent with each other.
pub trait Record: Sized {
    /// Names the record's fields.
    type Field: Copy + Eq + fmt::Debug + 'static;

    /// The record with every field optional.
    type Partial: Clone + Default;

    /// All fields, in declaration order.
    const FIELDS: &'static [Self::Field];

    /// Copies the listed fields into a partial, leaving the others empty.
    fn select(&self, fields: &[Self::Field]) -> Self::Partial;

    /// Overwrites the fields present in `edited`, keeping the rest.
    #[must_use]
    fn merge(self, edited: Self::Partial) -> Self;

    /// Converts the record into a partial with every field present.
    fn into_partial(self) -> Self::Partial;

    /// Returns every field not listed in `fields`, in declaration order.
    fn complement(fields: &[Self::Field]) -> SmallVec<[Self::Field; 8]> {
        Self::FIELDS
            .iter()
            .copied()
            .filter(|field| !fields.contains(field))
            .collect()
    }
}

// =============================================================================
// FieldOptic
// =============================================================================

/// An optic focusing on a single field of a struct.
///
/// The getter returns a reference to the field, which is cloned on `get`.
///
/// # Type Parameters
///
/// - `S`: The struct type
/// - `A`: The field type
/// - `G`: The getter function type
/// - `P`: The setter function type
pub struct FieldOptic<S, A, G, P>
where
    G: Fn(&S) -> &A,
    P: Fn(S, A) -> S,
{
    getter: G,
    setter: P,
    _marker: PhantomData<fn(S) -> A>,
}

impl<S, A, G, P> FieldOptic<S, A, G, P>
where
    G: Fn(&S) -> &A,
    P: Fn(S, A) -> S,
{
    /// Creates a field optic from a borrowing getter and a setter.
    #[must_use]
    pub const fn new(getter: G, setter: P) -> Self {
        Self {
            getter,
            setter,
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, P> Optic<S, A> for FieldOptic<S, A, G, P>
where
    A: Clone,
    G: Fn(&S) -> &A,
    P: Fn(S, A) -> S,
{
    #[inline]
    fn get(&self, source: &S) -> A {
        (self.getter)(source).clone()
    }

    #[inline]
    fn put(&self, source: S, target: A) -> S {
        (self.setter)(source, target)
    }
}

impl<S, A, G, P> Clone for FieldOptic<S, A, G, P>
where
    G: Fn(&S) -> &A + Clone,
    P: Fn(S, A) -> S + Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.getter.clone(), self.setter.clone())
    }
}

impl<S, A, G, P> fmt::Debug for FieldOptic<S, A, G, P>
where
    G: Fn(&S) -> &A,
    P: Fn(S, A) -> S,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("FieldOptic").finish_non_exhaustive()
    }
}

/// Creates a [`FieldOptic`] for a struct field.
///
/// Supports nested paths such as `field!(Person, address.street)`.
///
/// # Example
///
/// ```
/// use mag::field;
/// use mag::optics::Optic;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Address { street: String }
/// #[derive(Clone, PartialEq, Debug)]
/// struct Person { name: String, address: Address }
///
/// let street = field!(Person, address.street);
/// let person = Person { name: "Ada".into(), address: Address { street: "Main".into() } };
///
/// assert_eq!(street.get(&person), "Main");
/// assert_eq!(street.put(person, "High".into()).address.street, "High");
/// ```
#[macro_export]
macro_rules! field {
    ($source:ty, $($path:ident).+) => {
        $crate::optics::FieldOptic::new(
            |source: &$source| &source.$($path).+,
            |mut source: $source, value| {
                source.$($path).+ = value;
                source
            },
        )
    };
}

// =============================================================================
// Pick
// =============================================================================

/// Projects a record onto a subset of its fields.
///
/// `get` yields a `Partial` with only the picked fields present. `put`
/// merges every present field of the edited partial back into the record.
pub struct Pick<R: Record> {
    fields: SmallVec<[R::Field; 8]>,
}

impl<R: Record> Pick<R> {
    /// Picks the listed fields.
    #[must_use]
    pub fn new(fields: &[R::Field]) -> Self {
        Self {
            fields: fields.iter().copied().collect(),
        }
    }

    /// Picks every field except the listed ones.
    #[must_use]
    pub fn omitting(fields: &[R::Field]) -> Self {
        Self {
            fields: R::complement(fields),
        }
    }

    /// Returns the picked fields.
    pub fn fields(&self) -> &[R::Field] {
        &self.fields
    }
}

impl<R: Record> Optic<R, R::Partial> for Pick<R> {
    #[inline]
    fn get(&self, source: &R) -> R::Partial {
        source.select(&self.fields)
    }

    #[inline]
    fn put(&self, source: R, target: R::Partial) -> R {
        source.merge(target)
    }
}

impl<R: Record> Clone for Pick<R> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
        }
    }
}

impl<R: Record> fmt::Debug for Pick<R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Pick")
            .field("fields", &self.fields)
            .finish()
    }
}

// =============================================================================
// Defaulted
// =============================================================================

/// Reads an optional partial record, filling missing fields from a fallback.
///
/// The source type is `Option<R::Partial>`: `None` reads the fallback
/// unchanged, `Some(partial)` reads the fallback overlaid with the present
/// fields. Writing the value that is already read leaves the source as it
/// was, so sparse sources stay sparse until edited.
///
/// # Laws
///
/// `GetPut` and `PutGet` hold. `PutPut` does not hold in general: once an
/// edit has stored a full record, writing the fallback back stores it in
/// full too, while writing the fallback straight into `None` keeps `None`.
/// Both sources read the same record, so only the sparseness differs.
#[derive(Clone)]
pub struct Defaulted<R> {
    fallback: R,
}

impl<R> Defaulted<R> {
    /// Creates a defaulting optic over `fallback`.
    #[must_use]
    pub const fn new(fallback: R) -> Self {
        Self { fallback }
    }
}

impl<R> Optic<Option<R::Partial>, R> for Defaulted<R>
where
    R: Record + Clone + PartialEq,
{
    fn get(&self, source: &Option<R::Partial>) -> R {
        match source {
            Some(partial) => self.fallback.clone().merge(partial.clone()),
            None => self.fallback.clone(),
        }
    }

    fn put(&self, source: Option<R::Partial>, target: R) -> Option<R::Partial> {
        if self.get(&source) == target {
            source
        } else {
            Some(target.into_partial())
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for Defaulted<R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Defaulted")
            .field("fallback", &self.fallback)
            .finish()
    }
}
