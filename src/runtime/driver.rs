//! The commit loop.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::future::{Either, LocalBoxFuture, select};
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use thiserror::Error;
use tracing::{Instrument, debug, info_span, warn};

use crate::optics::Optic;
use crate::view::{LoadError, ViewNode};

use super::edit::{Edit, EditSender};
use super::host::Host;
use super::reconcile::Reconciler;

/// Knobs of a [`Runtime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeOptions {
    /// The label recorded on the runtime's `tracing` span.
    pub label: &'static str,
    /// The number of commits after which the runtime unmounts itself.
    pub max_cycles: Option<u64>,
}

impl RuntimeOptions {
    /// Sets the span label.
    #[must_use]
    pub const fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    /// Caps the number of commits.
    #[must_use]
    pub const fn with_max_cycles(mut self, max_cycles: u64) -> Self {
        self.max_cycles = Some(max_cycles);
        self
    }
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            label: "root",
            max_cycles: None,
        }
    }
}

/// Where a [`Runtime`] is in its commit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Mounted and waiting for one edit.
    Idle,
    /// Writing an edit back and re-rendering.
    Committing,
    /// Torn down. Terminal.
    Unmounted,
}

/// Errors returned by a [`Runtime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The runtime was unmounted.
    #[error("runtime is unmounted")]
    Unmounted,
}

/// Unmounts a [`Runtime`] from outside its loop.
///
/// Unmounting closes the edit channel. Edits already queued are discarded
/// and the runtime tears its tree down the next time it is polled.
#[derive(Debug, Clone)]
pub struct UnmountHandle {
    mounted: Rc<Cell<bool>>,
    sender: UnboundedSender<Edit>,
}

impl UnmountHandle {
    /// Requests the runtime to unmount.
    pub fn unmount(&self) {
        if self.mounted.replace(false) {
            debug!("unmount requested");
        }
        self.sender.close_channel();
    }

    /// Returns `false` once unmounting was requested.
    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }
}

/// Drives one mounted root: render, reconcile, await one edit, put, repeat.
///
/// The state is owned by the runtime and only changes through the root
/// optic's `put`, one edit at a time.
///
/// ```
/// use mag::optics::{constant, identity, Optic};
/// use mag::runtime::{Host, HostEvent, MemoryHost, Phase, Runtime};
/// use mag::view::adapter;
/// # futures::executor::block_on(async {
///
/// let increment = adapter::button()
///     .of(constant("+".to_string()).zip(identity::<u32>().update(|n| n + 1)));
///
/// let host = MemoryHost::new();
/// let mut runtime = Runtime::new(increment, 0, host.clone(), host.root());
/// runtime.mount().unwrap();
///
/// let button = host.node_at(&[]).unwrap();
/// host.dispatch(button, HostEvent::Click);
///
/// assert_eq!(runtime.step().await, Phase::Idle);
/// assert_eq!(*runtime.state(), 1);
/// # });
/// ```
pub struct Runtime<S, O, H: Host> {
    optic: O,
    state: S,
    tree: ViewNode,
    reconciler: Reconciler<H>,
    options: RuntimeOptions,
    cycle: u64,
    phase: Phase,
    mounted: Rc<Cell<bool>>,
    sender: UnboundedSender<Edit>,
    receiver: UnboundedReceiver<Edit>,
    loads: FuturesUnordered<LocalBoxFuture<'static, Edit>>,
}

impl<S, O, H> Runtime<S, O, H>
where
    S: Clone,
    O: Optic<S, ViewNode>,
    H: Host,
{
    /// Creates a runtime rendering `optic` over `state` under `root`.
    ///
    /// Nothing is mounted until [`mount`](Self::mount) or the first
    /// [`step`](Self::step).
    pub fn new(optic: O, state: S, host: H, root: H::Node) -> Self {
        Self::with_options(optic, state, host, root, RuntimeOptions::default())
    }

    /// Creates a runtime with explicit options.
    pub fn with_options(
        optic: O,
        state: S,
        host: H,
        root: H::Node,
        options: RuntimeOptions,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded();
        Self {
            optic,
            state,
            tree: ViewNode::Container(Vec::new()),
            reconciler: Reconciler::new(host, root),
            options,
            cycle: 0,
            phase: Phase::Idle,
            mounted: Rc::new(Cell::new(true)),
            sender,
            receiver,
            loads: FuturesUnordered::new(),
        }
    }

    /// Renders the current state and mounts it, attaching listeners and
    /// starting loaders. Does nothing if already mounted.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Unmounted`] once the runtime was unmounted.
    pub fn mount(&mut self) -> Result<(), RuntimeError> {
        if self.phase == Phase::Unmounted {
            return Err(RuntimeError::Unmounted);
        }
        if !self.mounted.get() {
            self.teardown();
            return Err(RuntimeError::Unmounted);
        }
        if !self.reconciler.is_mounted() {
            debug!(cycle = self.cycle, "mount");
            self.render();
        }
        Ok(())
    }

    /// Runs one commit cycle.
    ///
    /// Mounts first if needed, then waits for one edit from the host or a
    /// loader, writes it back through the root optic and re-renders. Edits
    /// made against an earlier cycle's tree are skipped.
    ///
    /// Returns [`Phase::Idle`] after a commit and [`Phase::Unmounted`] once
    /// the runtime is torn down.
    pub async fn step(&mut self) -> Phase {
        if self.mount().is_err() {
            return Phase::Unmounted;
        }

        let Some(edit) = self.next_edit().await else {
            self.teardown();
            return Phase::Unmounted;
        };
        if !self.mounted.get() {
            debug!(cycle = edit.cycle, "edit after unmount discarded");
            self.teardown();
            return Phase::Unmounted;
        }

        self.commit(edit);

        if self
            .options
            .max_cycles
            .is_some_and(|max_cycles| self.cycle >= max_cycles)
        {
            debug!(cycle = self.cycle, "cycle cap reached");
            self.teardown();
            return Phase::Unmounted;
        }
        self.phase
    }

    /// Steps until unmounted and returns the final state.
    pub async fn run(mut self) -> S {
        let span = info_span!("runtime", label = self.options.label);
        async move {
            while self.step().await != Phase::Unmounted {}
            self.state
        }
        .instrument(span)
        .await
    }

    async fn next_edit(&mut self) -> Option<Edit> {
        loop {
            let edit = if self.loads.is_empty() {
                self.receiver.next().await?
            } else {
                match select(self.receiver.next(), self.loads.next()).await {
                    Either::Left((edit, _)) => edit?,
                    Either::Right((Some(edit), _)) => edit,
                    Either::Right((None, _)) => continue,
                }
            };

            if edit.cycle == self.cycle {
                return Some(edit);
            }
            debug!(
                cycle = self.cycle,
                stale = edit.cycle,
                path = ?edit.path.as_slice(),
                "stale edit skipped"
            );
        }
    }

    fn commit(&mut self, edit: Edit) {
        self.phase = Phase::Committing;
        debug!(cycle = self.cycle, path = ?edit.path.as_slice(), "commit");

        let mut edited = self.tree.clone();
        if edited.replace_at(&edit.path, edit.node) {
            self.state = self.optic.put(self.state.clone(), edited);
        } else {
            warn!(path = ?edit.path.as_slice(), "edit path not in tree, ignored");
        }

        self.cycle += 1;
        self.render();
        self.phase = Phase::Idle;
    }

    fn render(&mut self) {
        self.tree = self.optic.get(&self.state);
        self.reconciler.reconcile(&self.tree);
        self.reconciler
            .attach(&self.tree, &EditSender::new(self.sender.clone(), self.cycle));

        // Loads of the previous cycle are dropped unsettled.
        self.loads = FuturesUnordered::new();
        let cycle = self.cycle;
        let loads = &self.loads;
        self.tree.for_each_loader(|path, loader| {
            let path = path.clone();
            let pending = loader.start();
            loads.push(
                async move {
                    let node = pending.await.unwrap_or_else(LoadError::into_node);
                    Edit { cycle, path, node }
                }
                .boxed_local(),
            );
        });
    }

    fn teardown(&mut self) {
        if self.phase == Phase::Unmounted {
            return;
        }
        self.mounted.set(false);
        self.receiver.close();
        self.loads = FuturesUnordered::new();
        self.reconciler.unmount();
        self.phase = Phase::Unmounted;
        debug!(cycle = self.cycle, "unmounted");
    }

    /// Returns a handle unmounting this runtime.
    pub fn handle(&self) -> UnmountHandle {
        UnmountHandle {
            mounted: Rc::clone(&self.mounted),
            sender: self.sender.clone(),
        }
    }

    /// Unmounts immediately, removing the tree from the host.
    pub fn unmount(&mut self) {
        self.teardown();
    }

    /// Returns the current state.
    pub const fn state(&self) -> &S {
        &self.state
    }

    /// Returns the tree rendered last.
    pub const fn tree(&self) -> &ViewNode {
        &self.tree
    }

    /// Returns the current phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the number of commits so far.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Returns the runtime options.
    pub const fn options(&self) -> &RuntimeOptions {
        &self.options
    }

    /// Returns the host.
    pub const fn host(&self) -> &H {
        self.reconciler.host()
    }

    /// Consumes the runtime, returning the state.
    pub fn into_state(self) -> S {
        self.state
    }
}

impl<S: fmt::Debug, O, H: Host> fmt::Debug for Runtime<S, O, H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Runtime")
            .field("state", &self.state)
            .field("cycle", &self.cycle)
            .field("phase", &self.phase)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::{constant, identity};
    use crate::runtime::{HostEvent, MemoryHost};
    use crate::view::adapter;
    use futures::executor::block_on;
    use rstest::rstest;

    fn counter() -> impl Optic<u32, ViewNode> + Clone {
        adapter::button().of(constant("+".to_string()).zip(identity::<u32>().update(|n| n + 1)))
    }

    #[rstest]
    fn options_builders() {
        let options = RuntimeOptions::default()
            .with_label("form")
            .with_max_cycles(3);
        assert_eq!(options.label, "form");
        assert_eq!(options.max_cycles, Some(3));
    }

    #[rstest]
    fn mount_after_unmount_fails() {
        let host = MemoryHost::new();
        let mut runtime = Runtime::new(counter(), 0, host.clone(), host.root());
        runtime.mount().unwrap();
        runtime.unmount();

        assert_eq!(runtime.mount(), Err(RuntimeError::Unmounted));
        assert!(host.children(host.root()).is_empty());
    }

    #[rstest]
    fn stale_edit_is_skipped() {
        let host = MemoryHost::new();
        let mut runtime = Runtime::new(counter(), 0, host.clone(), host.root());
        runtime.mount().unwrap();

        let stale = EditSender::new(runtime.sender.clone(), 7);
        assert!(stale.send(Default::default(), ViewNode::button("+")));
        host.dispatch(host.node_at(&[]).unwrap(), HostEvent::Click);

        assert_eq!(block_on(runtime.step()), Phase::Idle);
        assert_eq!(*runtime.state(), 1);
    }
}
