//! Mounting view trees into a host and driving the commit loop.
//!
//! A [`Runtime`] owns the application state and a root optic from that
//! state to a [`ViewNode`](crate::view::ViewNode). Each cycle it renders the
//! state with `get`, reconciles the host tree against the result, attaches
//! listeners, and waits for exactly one edit. The edit is spliced into the
//! rendered tree at its path and written back with `put`.
//!
//! The host is abstracted by the [`Host`] trait. [`MemoryHost`] implements
//! it over an in-memory arena and is available with the `testing` feature.
//!
//! Commits never interleave: listeners of a cycle stamp their edits with
//! that cycle, and the runtime skips edits from earlier cycles.

mod driver;
mod edit;
mod host;
#[cfg(any(test, feature = "testing"))]
mod memory;
mod reconcile;

pub use driver::{Phase, Runtime, RuntimeError, RuntimeOptions, UnmountHandle};
pub use edit::{Edit, EditSender};
pub use host::{Attribute, EventName, Host, HostEvent, Listener};
#[cfg(any(test, feature = "testing"))]
pub use memory::{MemoryHost, NodeId};
pub use reconcile::Reconciler;
