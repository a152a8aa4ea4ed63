//! # mag
//!
//! Composable bidirectional optics, and a runtime that renders application
//! state into a view tree through them and writes user edits back.
//!
//! ## Overview
//!
//! - **Optics**: an [`Optic`](optics::Optic) relates a source to a target
//!   with `get` and `put`. Field optics, choice optics, collection optics
//!   and trigger optics compose into one root optic per application.
//! - **View nodes**: the root optic's target is a
//!   [`ViewNode`](view::ViewNode), a closed tree of UI elements. Adapters
//!   turn plain values into nodes.
//! - **Runtime**: a [`Runtime`](runtime::Runtime) mounts the rendered tree
//!   into a [`Host`](runtime::Host), waits for one edit, puts it back into
//!   the state and reconciles the host tree with the next render.
//!
//! ## Feature Flags
//!
//! - `derive` (default): `#[derive(Record)]` and `#[derive(Choice)]`
//! - `serde`: serialization of view nodes and the `inspect_json` adapter
//! - `testing`: the in-memory host `MemoryHost`
//! - `full`: all of the above
//!
//! ## Example
//!
//! ```rust
//! use mag::prelude::*;
//!
//! #[derive(Clone, Debug, PartialEq, Record)]
//! struct Counter {
//!     count: u32,
//! }
//!
//! let increment = adapter::button().of(
//!     constant("+".to_string()).zip(Counter::count_optic().update(|n| n + 1)),
//! );
//!
//! let clicked = ViewNode::Button { label: "+".into(), clicked: true };
//! assert_eq!(increment.put(Counter { count: 0 }, clicked).count, 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

extern crate self as mag;

/// Prelude module for convenient imports.
///
/// ```rust
/// use mag::prelude::*;
/// ```
pub mod prelude {
    pub use crate::optics::*;
    pub use crate::runtime::{Host, HostEvent, Phase, Runtime, RuntimeOptions};
    pub use crate::view::{ViewNode, adapter};
}

pub mod optics;
pub mod runtime;
pub mod view;
