//! The host tree capability set.

use std::fmt;

use crate::view::{NodeKind, ViewNode};

/// A settable property of a host node.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    /// The displayed text of text, button and preformatted nodes.
    TextContent(String),
    /// The text of an input.
    Value(String),
    /// The value of a number input.
    NumberValue(f64),
    /// The state of a checkbox.
    Checked(bool),
}

impl Attribute {
    /// Returns the attribute name, the same for every value.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TextContent(_) => "textContent",
            Self::Value(_) => "value",
            Self::NumberValue(_) => "valueAsNumber",
            Self::Checked(_) => "checked",
        }
    }

    /// Returns `true` for attributes the host itself changes on user input.
    pub const fn is_host_edited(&self) -> bool {
        matches!(self, Self::Value(_) | Self::NumberValue(_) | Self::Checked(_))
    }

    /// Returns the attribute a view node sets on its host node.
    ///
    /// Containers, dividers and breaks carry none. Loaders carry the empty
    /// text of their placeholder.
    pub fn of(node: &ViewNode) -> Option<Self> {
        match node {
            ViewNode::Text(text) | ViewNode::Preformatted(text) => {
                Some(Self::TextContent(text.clone()))
            }
            ViewNode::Button { label, .. } => Some(Self::TextContent(label.clone())),
            ViewNode::Loader(_) => Some(Self::TextContent(String::new())),
            ViewNode::Input(value) => Some(Self::Value(value.clone())),
            ViewNode::NumberInput(value) => Some(Self::NumberValue(*value)),
            ViewNode::Checkbox(checked) => Some(Self::Checked(*checked)),
            ViewNode::Container(_) | ViewNode::Divider | ViewNode::Break => None,
        }
    }
}

/// The name of a host event a listener subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    /// A click on a button.
    Click,
    /// A change of an input, number input or checkbox.
    Input,
}

impl EventName {
    /// Returns the event a view node listens to, if it is editable.
    pub const fn of(node: &ViewNode) -> Option<Self> {
        match node {
            ViewNode::Button { .. } => Some(Self::Click),
            ViewNode::Input(_) | ViewNode::NumberInput(_) | ViewNode::Checkbox(_) => {
                Some(Self::Input)
            }
            _ => None,
        }
    }
}

/// An event delivered by the host to a listener.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// A click.
    Click,
    /// The new text of an input or number input.
    Input(String),
    /// The new state of a checkbox.
    Check(bool),
}

impl HostEvent {
    /// Returns the name listeners for this event are registered under.
    pub const fn name(&self) -> EventName {
        match self {
            Self::Click => EventName::Click,
            Self::Input(_) | Self::Check(_) => EventName::Input,
        }
    }

    /// Computes the edited node an event produces on `node`.
    ///
    /// Returns `None` when the event does not fit the node kind. A number
    /// input keeps its value when the text does not parse as a number or
    /// parses as `NaN`.
    pub fn edit(self, node: &ViewNode) -> Option<ViewNode> {
        match (node, self) {
            (ViewNode::Button { label, .. }, Self::Click) => Some(ViewNode::Button {
                label: label.clone(),
                clicked: true,
            }),
            (ViewNode::Input(_), Self::Input(text)) => Some(ViewNode::Input(text)),
            (ViewNode::NumberInput(previous), Self::Input(text)) => Some(ViewNode::NumberInput(
                text.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|value| !value.is_nan())
                    .unwrap_or(*previous),
            )),
            (ViewNode::Checkbox(_), Self::Check(checked)) => Some(ViewNode::Checkbox(checked)),
            _ => None,
        }
    }
}

/// A callback attached to a host node.
pub type Listener = Box<dyn FnMut(HostEvent)>;

/// The capabilities the reconciler needs from a host tree.
///
/// Implementations own the actual nodes (DOM elements, widgets, an
/// in-memory arena) and hand out cheap handles to them.
pub trait Host {
    /// A handle to a host node.
    type Node: Clone + fmt::Debug;

    /// Creates a detached node of the given kind.
    fn create_node(&mut self, kind: NodeKind) -> Self::Node;

    /// Sets an attribute, replacing any previous value of the same name.
    fn set_attribute(&mut self, node: &Self::Node, attribute: Attribute);

    /// Appends `child` as the last child of `parent`.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);

    /// Detaches `child` from `parent`, dropping its listeners.
    fn remove_child(&mut self, parent: &Self::Node, child: &Self::Node);

    /// Puts `new` in the place of `old`, which is detached.
    fn replace_node(&mut self, old: &Self::Node, new: &Self::Node);

    /// Attaches a listener, replacing any previous listener for `event` on
    /// that node.
    fn add_event_listener(&mut self, node: &Self::Node, event: EventName, listener: Listener);
}
