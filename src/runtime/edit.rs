//! Edits flowing from host listeners and loaders back to the runtime.

use futures::channel::mpsc::UnboundedSender;

use crate::view::{Path, ViewNode};

/// One edited node, produced by a host event or a settled loader.
#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    /// The commit cycle whose tree the edit was made against.
    pub cycle: u64,
    /// The position of the edited node.
    pub path: Path,
    /// The edited node.
    pub node: ViewNode,
}

/// Sends edits for one commit cycle.
///
/// Every listener attached during a cycle holds a clone. Edits sent after the
/// runtime moved on to a later cycle are dropped when received.
#[derive(Debug, Clone)]
pub struct EditSender {
    sender: UnboundedSender<Edit>,
    cycle: u64,
}

impl EditSender {
    /// Creates a sender stamping edits with `cycle`.
    pub const fn new(sender: UnboundedSender<Edit>, cycle: u64) -> Self {
        Self { sender, cycle }
    }

    /// Returns the cycle edits are stamped with.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Sends an edit. Returns `false` if the runtime is gone.
    pub fn send(&self, path: Path, node: ViewNode) -> bool {
        self.sender
            .unbounded_send(Edit {
                cycle: self.cycle,
                path,
                node,
            })
            .is_ok()
    }
}
