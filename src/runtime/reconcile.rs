//! Positional reconciliation of view trees against a host tree.
//!
//! The reconciler keeps a shadow of what it mounted: for every host node,
//! its kind, the attribute it last set, and its children. A new view tree is
//! matched against that shadow position by position:
//!
//! - a node of another kind is rebuilt and swapped in with `replace_node`
//! - a container first removes surplus children or appends empty text
//!   placeholders until the child counts match, then recurses
//! - any other node of the same kind only has its attribute set, and only
//!   when the value changed
//! - inputs, number inputs and checkboxes have their value written on every
//!   pass, since the host changes it on user input and the state may have
//!   rejected that change
//!
//! Nodes whose kind is stable are never recreated, so host state such as
//! focus or the cursor position of an input survives a commit.

use tracing::{trace, warn};

use crate::view::{NodeKind, Path, ViewNode};

use super::edit::EditSender;
use super::host::{Attribute, EventName, Host, HostEvent};

struct Mounted<N> {
    node: N,
    kind: NodeKind,
    attribute: Option<Attribute>,
    children: Vec<Mounted<N>>,
}

/// Mounts view trees into a host and keeps them in sync.
pub struct Reconciler<H: Host> {
    host: H,
    root: H::Node,
    mounted: Option<Mounted<H::Node>>,
}

impl<H: Host> Reconciler<H> {
    /// Creates a reconciler mounting under `root`.
    pub const fn new(host: H, root: H::Node) -> Self {
        Self {
            host,
            root,
            mounted: None,
        }
    }

    /// Returns the host.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Returns the node trees are mounted under.
    pub const fn root(&self) -> &H::Node {
        &self.root
    }

    /// Returns the host node of the mounted tree's root, if mounted.
    pub fn mounted_node(&self) -> Option<&H::Node> {
        self.mounted.as_ref().map(|mounted| &mounted.node)
    }

    /// Returns `true` while a tree is mounted.
    pub const fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Builds `tree` from scratch and appends it under the root, replacing
    /// any tree mounted before.
    pub fn mount(&mut self, tree: &ViewNode) {
        self.unmount();
        let mounted = build(&mut self.host, tree);
        self.host.append_child(&self.root, &mounted.node);
        trace!(kind = %mounted.kind, "mounted tree");
        self.mounted = Some(mounted);
    }

    /// Brings the host tree in line with `tree`, mounting it if nothing is
    /// mounted yet.
    pub fn reconcile(&mut self, tree: &ViewNode) {
        match &mut self.mounted {
            Some(mounted) => patch(&mut self.host, mounted, tree),
            None => self.mount(tree),
        }
    }

    /// Attaches a listener to every editable node of `tree`, which must be
    /// the tree last reconciled.
    ///
    /// Each listener turns its host event into an edited node and sends it
    /// with the node's path.
    pub fn attach(&mut self, tree: &ViewNode, sender: &EditSender) {
        if let Some(mounted) = &self.mounted {
            let mut path = Path::new();
            attach(&mut self.host, mounted, tree, &mut path, sender);
        }
    }

    /// Removes the mounted tree and its listeners from the host.
    pub fn unmount(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            trace!(kind = %mounted.kind, "remove mounted tree");
            self.host.remove_child(&self.root, &mounted.node);
        }
    }

    /// Consumes the reconciler, returning the host.
    pub fn into_host(self) -> H {
        self.host
    }
}

fn build<H: Host>(host: &mut H, node: &ViewNode) -> Mounted<H::Node> {
    let kind = node.kind();
    let handle = host.create_node(kind);
    trace!(%kind, "create node");

    let attribute = Attribute::of(node);
    if let Some(attribute) = &attribute {
        host.set_attribute(&handle, attribute.clone());
    }

    let children = node
        .children()
        .iter()
        .map(|child| {
            let mounted = build(host, child);
            host.append_child(&handle, &mounted.node);
            mounted
        })
        .collect();

    Mounted {
        node: handle,
        kind,
        attribute,
        children,
    }
}

fn patch<H: Host>(host: &mut H, mounted: &mut Mounted<H::Node>, node: &ViewNode) {
    if mounted.kind != node.kind() {
        let fresh = build(host, node);
        trace!(from = %mounted.kind, to = %fresh.kind, "replace node");
        host.replace_node(&mounted.node, &fresh.node);
        *mounted = fresh;
        return;
    }

    if let ViewNode::Container(children) = node {
        let target = children.len();
        if mounted.children.len() > target {
            for surplus in mounted.children.drain(target..) {
                trace!(kind = %surplus.kind, "remove child");
                host.remove_child(&mounted.node, &surplus.node);
            }
        }
        while mounted.children.len() < target {
            let placeholder = build(host, &ViewNode::Text(String::new()));
            trace!("append placeholder");
            host.append_child(&mounted.node, &placeholder.node);
            mounted.children.push(placeholder);
        }
        for (child, next) in mounted.children.iter_mut().zip(children) {
            patch(host, child, next);
        }
        return;
    }

    let attribute = Attribute::of(node);
    let stale = attribute != mounted.attribute;
    if let Some(next) = &attribute
        && (stale || next.is_host_edited())
    {
        trace!(name = next.name(), "patch attribute");
        host.set_attribute(&mounted.node, next.clone());
    }
    mounted.attribute = attribute;
}

fn attach<H: Host>(
    host: &mut H,
    mounted: &Mounted<H::Node>,
    node: &ViewNode,
    path: &mut Path,
    sender: &EditSender,
) {
    if let ViewNode::Container(children) = node {
        for (index, (child, next)) in mounted.children.iter().zip(children).enumerate() {
            path.push(index);
            attach(host, child, next, path, sender);
            path.pop();
        }
        return;
    }

    let Some(event) = EventName::of(node) else {
        return;
    };
    let target = node.clone();
    let at = path.clone();
    let sender = sender.clone();
    host.add_event_listener(
        &mounted.node,
        event,
        Box::new(move |host_event: HostEvent| {
            let name = host_event.name();
            match host_event.edit(&target) {
                Some(edited) => {
                    if !sender.send(at.clone(), edited) {
                        warn!(path = ?at.as_slice(), "event after unmount, discarded");
                    }
                }
                None => warn!(
                    path = ?at.as_slice(),
                    kind = %target.kind(),
                    event = ?name,
                    "event does not fit the node kind, ignored"
                ),
            }
        }),
    );
}
