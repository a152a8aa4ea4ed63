//! Derive macros for mag records and choices.
//!
//! # Available Derive Macros
//!
//! - [`Record`]: field optics, a `Field` enum and a `Partial` companion for structs
//! - [`Choice`]: one `Case` per variant and an exhaustive `choice` dispatcher for enums
//!
//! The generated code refers to `::mag::optics`, so these macros are meant to
//! be used through the re-exports in `mag::optics`.
//!
//! # Example: Record
//!
//! ```rust,ignore
//! use mag::optics::{Optic, Record};
//!
//! #[derive(Clone, Debug, PartialEq, Record)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! // Generated:
//! // - enum PointField { X, Y }
//! // - struct PointPartial { x: Option<i32>, y: Option<i32> }
//! // - Point::x_optic() -> impl Optic<Point, i32>
//! // - impl Record for Point
//!
//! let point = Point { x: 10, y: 20 };
//! assert_eq!(Point::x_optic().get(&point), 10);
//! ```
//!
//! # Example: Choice
//!
//! ```rust,ignore
//! use mag::optics::{identity, Choice, Optic};
//!
//! #[derive(Clone, Debug, PartialEq, Choice)]
//! enum Shape {
//!     Circle(f64),
//!     Rectangle(f64, f64),
//! }
//!
//! // Generated:
//! // - Shape::circle_case() -> Case<Shape, f64>
//! // - Shape::rectangle_case() -> Case<Shape, (f64, f64)>
//! // - Shape::choice(on_circle, on_rectangle) -> impl Optic<Shape, T>
//! // - impl Choice for Shape
//!
//! let area = Shape::choice(
//!     identity::<f64>().view(|r: &f64| 3.14 * r * r),
//!     identity::<(f64, f64)>().view(|(w, h): &(f64, f64)| w * h),
//! );
//! assert_eq!(area.get(&Shape::Rectangle(2.0, 3.0)), 6.0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod choice;
mod naming;
mod record;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro for record optics on structs with named fields.
///
/// # Requirements
///
/// - The struct must have named fields
/// - Every field type must implement `Clone`, `Debug` and `PartialEq`
///
/// # Generated Code
///
/// For a struct `Name` with a field `foo: T`:
///
/// ```rust,ignore
/// pub enum NameField { Foo, /* ... */ }
///
/// pub struct NamePartial {
///     pub foo: Option<T>,
///     /* ... */
/// }
///
/// impl Name {
///     pub fn foo_optic() -> impl Optic<Name, T> + Clone { ... }
/// }
///
/// impl Record for Name {
///     type Field = NameField;
///     type Partial = NamePartial;
///     /* ... */
/// }
/// ```
///
/// The generated enum and partial struct take the visibility of the struct,
/// and the partial's fields take the visibility of the original fields.
#[proc_macro_derive(Record)]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    TokenStream::from(record::expand(&input))
}

/// Derive macro for choice optics on enums.
///
/// # Requirements
///
/// - The type must be an enum with at least one variant
/// - Every payload type must implement `Clone`
///
/// # Payload Types
///
/// - **Unit variants** (e.g., `Empty`): `()`
/// - **Single-field variants** (e.g., `Circle(f64)` or `Label { text: String }`): the field type
/// - **Multi-field variants** (e.g., `Rectangle(f64, f64)`): a tuple of the field types
///
/// # Generated Code
///
/// ```rust,ignore
/// impl Shape {
///     pub fn circle_case() -> Case<Shape, f64> { ... }
///     pub fn rectangle_case() -> Case<Shape, (f64, f64)> { ... }
///
///     pub fn choice<T, H0, H1>(on_circle: H0, on_rectangle: H1) -> impl Optic<Shape, T> + Clone
///     where
///         T: PartialEq,
///         H0: Optic<f64, T> + Clone,
///         H1: Optic<(f64, f64), T> + Clone,
///     { ... }
/// }
///
/// impl Choice for Shape { ... }
/// ```
///
/// `choice` takes one handler per variant in declaration order, so leaving a
/// variant unhandled does not compile.
#[proc_macro_derive(Choice)]
pub fn derive_choice(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    TokenStream::from(choice::expand(&input))
}
