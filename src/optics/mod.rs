//! Bidirectional optics.
//!
//! An optic pairs a `get` that projects a target out of a source with a
//! `put` that writes an edited target back. Everything else in this crate is
//! built from them: a view is an optic from application state to a
//! [`ViewNode`](crate::view::ViewNode) tree, and a user edit on that tree is
//! turned into a new state by `put`.
//!
//! # Building Blocks
//!
//! - [`Optic`]: the trait, with the composition and combinator methods
//! - [`FunctionOptic`] / [`optic`]: an optic from a getter and a putter
//! - [`identity`] and [`constant`]
//! - [`FieldOptic`] / [`field!`](crate::field): a single struct field
//! - [`Record`]: field subsets ([`Optic::pick`], [`Optic::omit`]) and
//!   default filling ([`Optic::default`])
//! - [`Choice`], [`Case`] and [`Match`]: dispatch on enum variants
//! - [`Each`], [`Zip`] and [`Gather`]: several targets at once
//! - [`Traced`]: logs reads and writes through `tracing`
//!
//! # Composition
//!
//! `outer.to(inner)` and `inner.of(outer)` build the same optic. Both also
//! accept a constant (`to_constant`, `of_constant`) or a function building
//! the other side from the optic at hand (`to_with`, `of_with`).
//! Composition is associative.
//!
//! ```
//! use mag::optics::{identity, Optic, Record};
//!
//! #[derive(Clone, Debug, PartialEq, Record)]
//! struct Account {
//!     owner: String,
//!     balance: i64,
//! }
//!
//! let deposit = Account::balance_optic().update(|balance| balance + 10);
//! let account = Account { owner: "ada".into(), balance: 5 };
//!
//! assert!(!deposit.get(&account));
//! assert_eq!(deposit.put(account, true).balance, 15);
//!
//! let owner = identity::<Account>().to(Account::owner_optic());
//! assert_eq!(owner.get(&Account { owner: "bob".into(), balance: 0 }), "bob");
//! ```
//!
//! # Laws
//!
//! Optics built from lawful parts satisfy `GetPut` and `PutPut`. Optics
//! built from [`FunctionOptic`] additionally return the source unchanged
//! when the written target equals what is read. Action optics
//! ([`Optic::update`], [`Optic::set`]) intentionally break `PutGet`.

mod choice;
mod collection;
mod combinator;
mod optic;
mod record;
mod traced;

pub use choice::{Case, Choice, DispatchError, Inject, Match, Recover};
pub use collection::{Each, Gather, Zip};
pub use combinator::{Action, Assign, Guard, Involution, Projection};
pub use optic::{
    BoxedOptic, Composed, Constant, FunctionOptic, Identity, Optic, constant, identity, optic,
};
pub use record::{Defaulted, FieldOptic, Pick, Record};
pub use traced::Traced;

#[cfg(feature = "derive")]
pub use mag_derive::{Choice, Record};
