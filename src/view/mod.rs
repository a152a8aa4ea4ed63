//! The view node model.
//!
//! A [`ViewNode`] is the value a root optic produces from application state.
//! It is a closed tree of nine visual kinds plus an asynchronous
//! [`Loader`] placeholder. Nodes are plain values: rendering is
//! `root.get(&state)`, and an edit is a copy of the tree with one node
//! replaced.
//!
//! Nodes are addressed by a [`Path`] of child indices from the root.
//!
//! # Example
//!
//! ```
//! use mag::view::ViewNode;
//!
//! let tree = ViewNode::Container(vec![
//!     ViewNode::Text("name".into()),
//!     ViewNode::Input("ada".into()),
//! ]);
//!
//! assert_eq!(tree.at(&[1]), Some(&ViewNode::Input("ada".into())));
//!
//! let edited = tree.with_replaced(&[1], ViewNode::Input("grace".into()));
//! assert_eq!(edited.at(&[1]), Some(&ViewNode::Input("grace".into())));
//! ```

pub mod adapter;
mod loader;

use std::fmt;

use smallvec::SmallVec;

use crate::optics::{Case, Choice};

pub use loader::{LoadError, LoadResult, Loader};

/// A position in a view tree, as child indices from the root.
pub type Path = SmallVec<[usize; 8]>;

/// A node of a view tree.
///
/// With the `serde` feature, nodes serialize externally tagged
/// (`{"Text":"hi"}`, `{"Button":{"label":"+","clicked":false}}`,
/// `"Divider"`). Loaders are not serializable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewNode {
    /// An ordered group of children.
    Container(Vec<ViewNode>),
    /// Display-only text.
    Text(String),
    /// An editable line of text.
    Input(String),
    /// An editable number.
    NumberInput(f64),
    /// A toggle.
    Checkbox(bool),
    /// A clickable button. `clicked` is `true` only in the edited node a
    /// click produces.
    Button {
        /// The button caption.
        label: String,
        /// Whether this node records a click.
        clicked: bool,
    },
    /// A horizontal rule.
    Divider,
    /// A line break.
    Break,
    /// Display-only preformatted text.
    Preformatted(String),
    /// Content that resolves asynchronously. Mounted as an empty text node
    /// until it settles.
    #[cfg_attr(feature = "serde", serde(skip))]
    Loader(Loader),
}

/// The kind of host node a [`ViewNode`] mounts as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A [`ViewNode::Container`].
    Container,
    /// A [`ViewNode::Text`], and the placeholder of a [`ViewNode::Loader`].
    Text,
    /// A [`ViewNode::Input`].
    Input,
    /// A [`ViewNode::NumberInput`].
    NumberInput,
    /// A [`ViewNode::Checkbox`].
    Checkbox,
    /// A [`ViewNode::Button`].
    Button,
    /// A [`ViewNode::Divider`].
    Divider,
    /// A [`ViewNode::Break`].
    Break,
    /// A [`ViewNode::Preformatted`].
    Preformatted,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Container => "container",
            Self::Text => "text",
            Self::Input => "input",
            Self::NumberInput => "number-input",
            Self::Checkbox => "checkbox",
            Self::Button => "button",
            Self::Divider => "divider",
            Self::Break => "break",
            Self::Preformatted => "preformatted",
        };
        formatter.write_str(name)
    }
}

impl ViewNode {
    /// Returns the host node kind this node mounts as.
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Container(_) => NodeKind::Container,
            Self::Text(_) | Self::Loader(_) => NodeKind::Text,
            Self::Input(_) => NodeKind::Input,
            Self::NumberInput(_) => NodeKind::NumberInput,
            Self::Checkbox(_) => NodeKind::Checkbox,
            Self::Button { .. } => NodeKind::Button,
            Self::Divider => NodeKind::Divider,
            Self::Break => NodeKind::Break,
            Self::Preformatted(_) => NodeKind::Preformatted,
        }
    }

    /// Creates a button that has not been clicked.
    pub fn button(label: impl Into<String>) -> Self {
        Self::Button {
            label: label.into(),
            clicked: false,
        }
    }

    /// Returns the children of a container, or an empty slice.
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Container(children) => children,
            _ => &[],
        }
    }

    /// Returns the node at `path`, if any.
    pub fn at(&self, path: &[usize]) -> Option<&Self> {
        path.iter()
            .try_fold(self, |node, &index| node.children().get(index))
    }

    /// Replaces the node at `path`.
    ///
    /// Returns `false`, leaving the tree untouched, if `path` does not
    /// address a node.
    pub fn replace_at(&mut self, path: &[usize], node: Self) -> bool {
        let Some((&last, parents)) = path.split_last() else {
            *self = node;
            return true;
        };
        let mut current = self;
        for &index in parents {
            let Self::Container(children) = current else {
                return false;
            };
            let Some(child) = children.get_mut(index) else {
                return false;
            };
            current = child;
        }
        match current {
            Self::Container(children) => children.get_mut(last).is_some_and(|slot| {
                *slot = node;
                true
            }),
            _ => false,
        }
    }

    /// Returns a copy of this tree with the node at `path` replaced.
    #[must_use]
    pub fn with_replaced(mut self, path: &[usize], node: Self) -> Self {
        self.replace_at(path, node);
        self
    }

    /// Visits every loader in the tree with its path, depth first.
    pub fn for_each_loader<F>(&self, mut visit: F)
    where
        F: FnMut(&Path, &Loader),
    {
        fn walk<F: FnMut(&Path, &Loader)>(node: &ViewNode, path: &mut Path, visit: &mut F) {
            match node {
                ViewNode::Loader(loader) => visit(path, loader),
                ViewNode::Container(children) => {
                    for (index, child) in children.iter().enumerate() {
                        path.push(index);
                        walk(child, path, visit);
                        path.pop();
                    }
                }
                _ => {}
            }
        }
        walk(self, &mut Path::new(), &mut visit);
    }
}

// =============================================================================
// Cases
// =============================================================================

impl Choice for ViewNode {
    const TAGS: &'static [&'static str] = &[
        "Container",
        "Text",
        "Input",
        "NumberInput",
        "Checkbox",
        "Button",
        "Divider",
        "Break",
        "Preformatted",
        "Loader",
    ];

    fn tag(&self) -> &'static str {
        match self {
            Self::Container(_) => "Container",
            Self::Text(_) => "Text",
            Self::Input(_) => "Input",
            Self::NumberInput(_) => "NumberInput",
            Self::Checkbox(_) => "Checkbox",
            Self::Button { .. } => "Button",
            Self::Divider => "Divider",
            Self::Break => "Break",
            Self::Preformatted(_) => "Preformatted",
            Self::Loader(_) => "Loader",
        }
    }
}

macro_rules! single_field_case {
    ($(#[$doc:meta])* $method:ident, $variant:ident, $payload:ty) => {
        $(#[$doc])*
        #[must_use]
        pub fn $method() -> Case<Self, $payload> {
            Case::new(
                stringify!($variant),
                |node: &Self| match node {
                    Self::$variant(value) => Some(value.clone()),
                    _ => None,
                },
                Self::$variant,
            )
        }
    };
}

macro_rules! unit_case {
    ($(#[$doc:meta])* $method:ident, $variant:ident) => {
        $(#[$doc])*
        #[must_use]
        pub fn $method() -> Case<Self, ()> {
            Case::new(
                stringify!($variant),
                |node: &Self| matches!(node, Self::$variant).then_some(()),
                |()| Self::$variant,
            )
        }
    };
}

impl ViewNode {
    single_field_case!(
        /// The case of [`ViewNode::Container`].
        container_case, Container, Vec<ViewNode>
    );
    single_field_case!(
        /// The case of [`ViewNode::Text`].
        text_case, Text, String
    );
    single_field_case!(
        /// The case of [`ViewNode::Input`].
        input_case, Input, String
    );
    single_field_case!(
        /// The case of [`ViewNode::NumberInput`].
        number_input_case, NumberInput, f64
    );
    single_field_case!(
        /// The case of [`ViewNode::Checkbox`].
        checkbox_case, Checkbox, bool
    );
    single_field_case!(
        /// The case of [`ViewNode::Preformatted`].
        preformatted_case, Preformatted, String
    );
    single_field_case!(
        /// The case of [`ViewNode::Loader`].
        loader_case, Loader, Loader
    );
    unit_case!(
        /// The case of [`ViewNode::Divider`].
        divider_case, Divider
    );
    unit_case!(
        /// The case of [`ViewNode::Break`].
        break_case, Break
    );

    /// The case of [`ViewNode::Button`], with `(label, clicked)` as payload.
    #[must_use]
    pub fn button_case() -> Case<Self, (String, bool)> {
        Case::new(
            "Button",
            |node: &Self| match node {
                Self::Button { label, clicked } => Some((label.clone(), *clicked)),
                _ => None,
            },
            |(label, clicked)| Self::Button { label, clicked },
        )
    }
}

static_assertions::assert_impl_all!(ViewNode: Clone, PartialEq, fmt::Debug);
static_assertions::assert_not_impl_any!(ViewNode: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> ViewNode {
        ViewNode::Container(vec![
            ViewNode::Text("title".into()),
            ViewNode::Container(vec![ViewNode::Checkbox(false), ViewNode::Divider]),
        ])
    }

    #[rstest]
    #[case(&[], Some(NodeKind::Container))]
    #[case(&[0], Some(NodeKind::Text))]
    #[case(&[1, 0], Some(NodeKind::Checkbox))]
    #[case(&[1, 1], Some(NodeKind::Divider))]
    #[case(&[1, 2], None)]
    #[case(&[0, 0], None)]
    fn at_follows_child_indices(#[case] path: &[usize], #[case] expected: Option<NodeKind>) {
        assert_eq!(sample().at(path).map(ViewNode::kind), expected);
    }

    #[rstest]
    fn replace_at_substitutes_one_node() {
        let mut tree = sample();
        assert!(tree.replace_at(&[1, 0], ViewNode::Checkbox(true)));
        assert_eq!(tree.at(&[1, 0]), Some(&ViewNode::Checkbox(true)));
        assert_eq!(tree.at(&[0]), Some(&ViewNode::Text("title".into())));
    }

    #[rstest]
    #[case(&[5])]
    #[case(&[0, 0])]
    fn replace_at_rejects_missing_paths(#[case] path: &[usize]) {
        let mut tree = sample();
        assert!(!tree.replace_at(path, ViewNode::Break));
        assert_eq!(tree, sample());
    }

    #[rstest]
    fn empty_path_replaces_root() {
        assert_eq!(sample().with_replaced(&[], ViewNode::Break), ViewNode::Break);
    }

    #[rstest]
    fn loaders_mount_as_text() {
        let loader = ViewNode::Loader(Loader::ready(ViewNode::Divider));
        assert_eq!(loader.kind(), NodeKind::Text);
        assert_eq!(loader.tag(), "Loader");
    }

    #[rstest]
    fn for_each_loader_reports_paths() {
        let tree = ViewNode::Container(vec![
            ViewNode::Text("a".into()),
            ViewNode::Container(vec![ViewNode::Loader(Loader::ready(ViewNode::Break))]),
        ]);
        let mut paths = Vec::new();
        tree.for_each_loader(|path, _| paths.push(path.to_vec()));
        assert_eq!(paths, vec![vec![1, 0]]);
    }

    #[rstest]
    fn button_case_round_trips_payload() {
        let case = ViewNode::button_case();
        assert_eq!(case.preview(&ViewNode::button("+")), Some(("+".to_string(), false)));
        assert_eq!(case.review(("-".into(), true)), ViewNode::Button {
            label: "-".into(),
            clicked: true
        });
        assert_eq!(case.preview(&ViewNode::Divider), None);
    }
}
