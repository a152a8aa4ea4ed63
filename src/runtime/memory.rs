//! An in-memory host tree.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::view::NodeKind;

use super::host::{Attribute, EventName, Host, HostEvent, Listener};

/// A handle to a node of a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

struct Entry {
    kind: NodeKind,
    attributes: Vec<Attribute>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    listeners: Vec<(EventName, Listener)>,
}

impl Entry {
    const fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: Vec::new(),
            children: Vec::new(),
            parent: None,
            listeners: Vec::new(),
        }
    }
}

struct Arena {
    entries: Vec<Entry>,
    root: NodeId,
    created: usize,
    replaced: usize,
}

impl Arena {
    fn entry(&self, node: NodeId) -> Option<&Entry> {
        self.entries.get(node.0)
    }

    fn entry_mut(&mut self, node: NodeId) -> Option<&mut Entry> {
        self.entries.get_mut(node.0)
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.entry(node).and_then(|entry| entry.parent)
            && let Some(siblings) = self.entry_mut(parent).map(|entry| &mut entry.children)
        {
            siblings.retain(|sibling| *sibling != node);
        }
        if let Some(entry) = self.entry_mut(node) {
            entry.parent = None;
        }
        self.drop_listeners(node);
    }

    fn absorb(&mut self, node: NodeId, event: &HostEvent) {
        let Some(entry) = self.entry_mut(node) else {
            return;
        };
        let attribute = match (entry.kind, event) {
            (NodeKind::Input, HostEvent::Input(text)) => Attribute::Value(text.clone()),
            (NodeKind::NumberInput, HostEvent::Input(text)) => {
                Attribute::NumberValue(text.trim().parse().unwrap_or(f64::NAN))
            }
            (NodeKind::Checkbox, HostEvent::Check(checked)) => Attribute::Checked(*checked),
            _ => return,
        };
        entry
            .attributes
            .retain(|existing| existing.name() != attribute.name());
        entry.attributes.push(attribute);
    }

    fn drop_listeners(&mut self, node: NodeId) {
        let children = match self.entry_mut(node) {
            Some(entry) => {
                entry.listeners.clear();
                entry.children.clone()
            }
            None => return,
        };
        for child in children {
            self.drop_listeners(child);
        }
    }
}

/// A host tree kept in an arena, for tests and headless embedding.
///
/// Clones share the same tree, so a test can keep one clone for inspection
/// and event dispatch while a runtime owns another.
///
/// ```
/// use mag::runtime::{Host, HostEvent, MemoryHost};
/// use mag::view::NodeKind;
///
/// let mut host = MemoryHost::new();
/// let root = host.root();
/// let button = host.create_node(NodeKind::Button);
/// host.append_child(&root, &button);
///
/// assert_eq!(host.node_at(&[]), Some(button));
/// assert!(!host.dispatch(button, HostEvent::Click));
/// ```
#[derive(Clone)]
pub struct MemoryHost {
    inner: Rc<RefCell<Arena>>,
}

impl MemoryHost {
    /// Creates a host holding a single container, the root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Arena {
                entries: vec![Entry::new(NodeKind::Container)],
                root: NodeId(0),
                created: 0,
                replaced: 0,
            })),
        }
    }

    /// Returns the root container.
    pub fn root(&self) -> NodeId {
        self.inner.borrow().root
    }

    /// Resolves a path of child indices starting at the first child of the
    /// root, where a mounted tree lives.
    pub fn node_at(&self, path: &[usize]) -> Option<NodeId> {
        let arena = self.inner.borrow();
        let mut node = *arena.entry(arena.root)?.children.first()?;
        for &index in path {
            node = *arena.entry(node)?.children.get(index)?;
        }
        Some(node)
    }

    /// Returns the kind of a node.
    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.inner.borrow().entry(node).map(|entry| entry.kind)
    }

    /// Returns the children of a node, in order.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.inner
            .borrow()
            .entry(node)
            .map(|entry| entry.children.clone())
            .unwrap_or_default()
    }

    /// Returns the parent of an attached node.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.inner.borrow().entry(node)?.parent
    }

    /// Returns the attribute of a node with the given name.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<Attribute> {
        self.inner
            .borrow()
            .entry(node)?
            .attributes
            .iter()
            .find(|attribute| attribute.name() == name)
            .cloned()
    }

    /// Returns every attribute set on a node.
    pub fn attributes(&self, node: NodeId) -> Vec<Attribute> {
        self.inner
            .borrow()
            .entry(node)
            .map(|entry| entry.attributes.clone())
            .unwrap_or_default()
    }

    /// Returns the `textContent` of a node.
    pub fn text(&self, node: NodeId) -> Option<String> {
        match self.attribute(node, "textContent")? {
            Attribute::TextContent(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the `value` of an input.
    pub fn value(&self, node: NodeId) -> Option<String> {
        match self.attribute(node, "value")? {
            Attribute::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the `valueAsNumber` of a number input.
    pub fn number(&self, node: NodeId) -> Option<f64> {
        match self.attribute(node, "valueAsNumber")? {
            Attribute::NumberValue(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the `checked` state of a checkbox.
    pub fn checked(&self, node: NodeId) -> Option<bool> {
        match self.attribute(node, "checked")? {
            Attribute::Checked(checked) => Some(checked),
            _ => None,
        }
    }

    /// Delivers an event to the listener attached to `node` for it.
    ///
    /// Like a user acting on a real host, an input or check event first
    /// changes the node's own value, whether or not a listener is attached.
    /// An unparsable number reads as `NaN`. Returns `false` when no listener
    /// is attached.
    pub fn dispatch(&self, node: NodeId, event: HostEvent) -> bool {
        let name = event.name();
        let taken = {
            let mut arena = self.inner.borrow_mut();
            arena.absorb(node, &event);
            arena.entry_mut(node).and_then(|entry| {
                let position = entry
                    .listeners
                    .iter()
                    .position(|(attached, _)| *attached == name)?;
                Some(entry.listeners.remove(position).1)
            })
        };
        let Some(mut listener) = taken else {
            return false;
        };

        // The arena is released while the listener runs.
        listener(event);

        let mut arena = self.inner.borrow_mut();
        if let Some(entry) = arena.entry_mut(node)
            && !entry.listeners.iter().any(|(attached, _)| *attached == name)
        {
            entry.listeners.push((name, listener));
        }
        true
    }

    /// Returns the number of attached listeners in the whole arena.
    pub fn listener_count(&self) -> usize {
        self.inner
            .borrow()
            .entries
            .iter()
            .map(|entry| entry.listeners.len())
            .sum()
    }

    /// Returns how many nodes were created, the root excluded.
    pub fn created(&self) -> usize {
        self.inner.borrow().created
    }

    /// Returns how many `replace_node` calls were made.
    pub fn replaced(&self) -> usize {
        self.inner.borrow().replaced
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryHost {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arena = self.inner.borrow();
        formatter
            .debug_struct("MemoryHost")
            .field("nodes", &arena.entries.len())
            .field("created", &arena.created)
            .field("replaced", &arena.replaced)
            .finish()
    }
}

impl Host for MemoryHost {
    type Node = NodeId;

    fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let mut arena = self.inner.borrow_mut();
        let id = NodeId(arena.entries.len());
        arena.entries.push(Entry::new(kind));
        arena.created += 1;
        id
    }

    fn set_attribute(&mut self, node: &NodeId, attribute: Attribute) {
        let mut arena = self.inner.borrow_mut();
        if let Some(entry) = arena.entry_mut(*node) {
            entry
                .attributes
                .retain(|existing| existing.name() != attribute.name());
            entry.attributes.push(attribute);
        }
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        let mut arena = self.inner.borrow_mut();
        if arena.entry(*child).is_none() {
            return;
        }
        if let Some(entry) = arena.entry_mut(*parent) {
            entry.children.push(*child);
        } else {
            return;
        }
        if let Some(entry) = arena.entry_mut(*child) {
            entry.parent = Some(*parent);
        }
    }

    fn remove_child(&mut self, parent: &NodeId, child: &NodeId) {
        let mut arena = self.inner.borrow_mut();
        if arena.entry(*child).and_then(|entry| entry.parent) == Some(*parent) {
            arena.detach(*child);
        }
    }

    fn replace_node(&mut self, old: &NodeId, new: &NodeId) {
        let mut arena = self.inner.borrow_mut();
        let Some(parent) = arena.entry(*old).and_then(|entry| entry.parent) else {
            return;
        };
        if let Some(slot) = arena
            .entry_mut(parent)
            .and_then(|entry| entry.children.iter_mut().find(|child| **child == *old))
        {
            *slot = *new;
        }
        if let Some(entry) = arena.entry_mut(*new) {
            entry.parent = Some(parent);
        }
        if let Some(entry) = arena.entry_mut(*old) {
            entry.parent = None;
        }
        arena.drop_listeners(*old);
        arena.replaced += 1;
    }

    fn add_event_listener(&mut self, node: &NodeId, event: EventName, listener: Listener) {
        let mut arena = self.inner.borrow_mut();
        if let Some(entry) = arena.entry_mut(*node) {
            entry.listeners.retain(|(attached, _)| *attached != event);
            entry.listeners.push((event, listener));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    #[rstest]
    fn set_attribute_replaces_by_name() {
        let mut host = MemoryHost::new();
        let input = host.create_node(NodeKind::Input);
        host.set_attribute(&input, Attribute::Value("a".into()));
        host.set_attribute(&input, Attribute::Value("b".into()));

        assert_eq!(host.attributes(input), vec![Attribute::Value("b".into())]);
        assert_eq!(host.value(input), Some("b".into()));
    }

    #[rstest]
    fn replace_node_keeps_position_and_drops_listeners() {
        let mut host = MemoryHost::new();
        let root = host.root();
        let first = host.create_node(NodeKind::Text);
        let second = host.create_node(NodeKind::Button);
        host.append_child(&root, &first);
        host.append_child(&root, &second);
        host.add_event_listener(&second, EventName::Click, Box::new(|_| {}));

        let fresh = host.create_node(NodeKind::Checkbox);
        host.replace_node(&second, &fresh);

        assert_eq!(host.children(root), vec![first, fresh]);
        assert_eq!(host.parent(second), None);
        assert_eq!(host.listener_count(), 0);
        assert_eq!(host.replaced(), 1);
    }

    #[rstest]
    fn dispatch_keeps_listener_attached() {
        let mut host = MemoryHost::new();
        let button = host.create_node(NodeKind::Button);
        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        host.add_event_listener(
            &button,
            EventName::Click,
            Box::new(move |_| counter.set(counter.get() + 1)),
        );

        assert!(host.dispatch(button, HostEvent::Click));
        assert!(host.dispatch(button, HostEvent::Click));
        assert!(!host.dispatch(button, HostEvent::Input("x".into())));
        assert_eq!(clicks.get(), 2);
    }

    #[rstest]
    #[case(NodeKind::Input, HostEvent::Input("typed".into()), Some(Attribute::Value("typed".into())))]
    #[case(NodeKind::Checkbox, HostEvent::Check(true), Some(Attribute::Checked(true)))]
    #[case(NodeKind::Checkbox, HostEvent::Input("yes".into()), None)]
    #[case(NodeKind::Button, HostEvent::Click, None)]
    fn dispatch_changes_node_value(
        #[case] kind: NodeKind,
        #[case] event: HostEvent,
        #[case] expected: Option<Attribute>,
    ) {
        let mut host = MemoryHost::new();
        let node = host.create_node(kind);
        host.dispatch(node, event);

        assert_eq!(host.attributes(node).into_iter().next(), expected);
    }

    #[rstest]
    fn dispatch_reads_unparsable_number_as_nan() {
        let mut host = MemoryHost::new();
        let number = host.create_node(NodeKind::NumberInput);
        host.set_attribute(&number, Attribute::NumberValue(1.0));
        host.dispatch(number, HostEvent::Input("abc".into()));

        assert!(host.number(number).is_some_and(f64::is_nan));
    }

    #[rstest]
    fn add_event_listener_replaces_previous() {
        let mut host = MemoryHost::new();
        let input = host.create_node(NodeKind::Input);
        host.add_event_listener(&input, EventName::Input, Box::new(|_| {}));
        host.add_event_listener(&input, EventName::Input, Box::new(|_| {}));

        assert_eq!(host.listener_count(), 1);
    }
}
