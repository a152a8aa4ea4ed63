//! Optics from plain values to view nodes.
//!
//! Each adapter turns the payload of one node kind into that node and back,
//! so an application builds its view by composing field optics with
//! adapters:
//!
//! ```
//! use mag::optics::{Optic, Record};
//! use mag::view::{adapter, ViewNode};
//!
//! #[derive(Clone, Debug, PartialEq, Record)]
//! struct Profile {
//!     name: String,
//! }
//!
//! let name_input = Profile::name_optic().to(adapter::input());
//! let profile = Profile { name: "ada".into() };
//!
//! assert_eq!(name_input.get(&profile), ViewNode::Input("ada".into()));
//! assert_eq!(
//!     name_input.put(profile, ViewNode::Input("grace".into())).name,
//!     "grace"
//! );
//! ```
//!
//! Writing a node of another kind through an adapter keeps the payload.

use std::fmt;
use std::future::Future;
use std::rc::Rc;

use crate::optics::{Inject, Optic, Projection};

use super::{LoadResult, Loader, ViewNode};

/// `Vec<ViewNode>` to [`ViewNode::Container`].
#[must_use]
pub fn container() -> Inject<ViewNode, Vec<ViewNode>> {
    ViewNode::container_case().inject()
}

/// `String` to [`ViewNode::Text`].
#[must_use]
pub fn text() -> Inject<ViewNode, String> {
    ViewNode::text_case().inject()
}

/// `String` to [`ViewNode::Input`].
#[must_use]
pub fn input() -> Inject<ViewNode, String> {
    ViewNode::input_case().inject()
}

/// `f64` to [`ViewNode::NumberInput`].
#[must_use]
pub fn number_input() -> Inject<ViewNode, f64> {
    ViewNode::number_input_case().inject()
}

/// `bool` to [`ViewNode::Checkbox`].
#[must_use]
pub fn checkbox() -> Inject<ViewNode, bool> {
    ViewNode::checkbox_case().inject()
}

/// `(label, clicked)` to [`ViewNode::Button`].
///
/// Pair it with an action optic to react to clicks:
///
/// ```
/// use mag::optics::{constant, identity, Optic};
/// use mag::view::{adapter, ViewNode};
///
/// let increment = adapter::button()
///     .of(constant("+".to_string()).zip(identity::<i32>().update(|n| n + 1)));
///
/// assert_eq!(increment.get(&0), ViewNode::button("+"));
/// assert_eq!(
///     increment.put(0, ViewNode::Button { label: "+".into(), clicked: true }),
///     1
/// );
/// ```
#[must_use]
pub fn button() -> Inject<ViewNode, (String, bool)> {
    ViewNode::button_case().inject()
}

/// `()` to [`ViewNode::Divider`].
#[must_use]
pub fn divider() -> Inject<ViewNode, ()> {
    ViewNode::divider_case().inject()
}

/// `()` to [`ViewNode::Break`].
#[must_use]
pub fn line_break() -> Inject<ViewNode, ()> {
    ViewNode::break_case().inject()
}

/// `String` to [`ViewNode::Preformatted`].
#[must_use]
pub fn preformatted() -> Inject<ViewNode, String> {
    ViewNode::preformatted_case().inject()
}

/// Renders any value with its pretty `Debug` output. Read-only.
#[must_use]
pub fn inspect<S: fmt::Debug>() -> Projection<fn(&S) -> ViewNode> {
    Projection::new(|source: &S| ViewNode::Preformatted(format!("{source:#?}")))
}

/// Renders any value as pretty-printed JSON. Read-only.
///
/// A value that fails to serialize renders the serialization error.
#[cfg(feature = "serde")]
#[must_use]
pub fn inspect_json<S: serde::Serialize>() -> Projection<fn(&S) -> ViewNode> {
    Projection::new(|source: &S| {
        ViewNode::Preformatted(
            serde_json::to_string_pretty(source).unwrap_or_else(|error| error.to_string()),
        )
    })
}

/// An optic rendering an asynchronously loaded node.
///
/// `get` produces a [`ViewNode::Loader`] that runs `fetch` on a snapshot of
/// the source. When the load settles, the runtime writes the resolved node,
/// or [`LoadError::into_node`](super::LoadError::into_node) on rejection,
/// through `put`, which hands it to `settle`. Writing the loader node itself
/// leaves the source unchanged.
pub struct Load<F, P> {
    fetch: Rc<F>,
    settle: P,
}

impl<F, P: Clone> Clone for Load<F, P> {
    fn clone(&self) -> Self {
        Self {
            fetch: Rc::clone(&self.fetch),
            settle: self.settle.clone(),
        }
    }
}

impl<F, P> fmt::Debug for Load<F, P> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Load").finish_non_exhaustive()
    }
}

impl<S, F, Fut, P> Optic<S, ViewNode> for Load<F, P>
where
    S: Clone + 'static,
    F: Fn(&S) -> Fut + 'static,
    Fut: Future<Output = LoadResult> + 'static,
    P: Fn(S, ViewNode) -> S,
{
    fn get(&self, source: &S) -> ViewNode {
        let snapshot = source.clone();
        let fetch = Rc::clone(&self.fetch);
        ViewNode::Loader(Loader::new(move || fetch(&snapshot)))
    }

    fn put(&self, source: S, target: ViewNode) -> S {
        match target {
            ViewNode::Loader(_) => source,
            settled => (self.settle)(source, settled),
        }
    }
}

/// Creates a [`Load`] optic from a fetch function and a settle function.
#[must_use]
pub fn loader<F, P>(fetch: F, settle: P) -> Load<F, P> {
    Load {
        fetch: Rc::new(fetch),
        settle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::identity;
    use crate::view::LoadError;
    use futures::executor::block_on;
    use rstest::rstest;

    #[rstest]
    fn adapters_keep_payload_for_other_kinds() {
        assert_eq!(input().put("kept".into(), ViewNode::Divider), "kept");
        assert!(!checkbox().put(true, ViewNode::Checkbox(false)));
        assert_eq!(number_input().put(1.5, ViewNode::NumberInput(2.5)), 2.5);
    }

    #[rstest]
    #[case(divider(), ViewNode::Divider)]
    #[case(line_break(), ViewNode::Break)]
    fn unit_adapters_render_their_kind(
        #[case] adapter: Inject<ViewNode, ()>,
        #[case] expected: ViewNode,
    ) {
        assert_eq!(adapter.get(&()), expected);
    }

    #[rstest]
    fn container_renders_children() {
        let children = vec![ViewNode::Text("a".into()), ViewNode::Break];
        assert_eq!(container().get(&children), ViewNode::Container(children));
    }

    #[rstest]
    fn inspect_renders_debug_output_and_ignores_writes() {
        let optic = identity::<(i32, bool)>().to(inspect::<(i32, bool)>());
        let rendered = optic.get(&(1, true));
        assert!(matches!(&rendered, ViewNode::Preformatted(text) if text.contains("true")));
        assert_eq!(optic.put((1, true), ViewNode::Divider), (1, true));
    }

    #[rstest]
    fn loader_resolves_from_source_snapshot() {
        let optic = loader(
            |count: &i32| {
                let count = *count;
                async move { Ok::<_, LoadError>(ViewNode::Text(count.to_string())) }
            },
            |_count: i32, node: ViewNode| match node {
                ViewNode::Text(text) => text.parse::<i32>().unwrap_or(-1),
                _ => -1,
            },
        );

        let ViewNode::Loader(pending) = optic.get(&7) else {
            panic!("expected a loader node");
        };
        let resolved = block_on(pending.start()).unwrap();
        assert_eq!(resolved, ViewNode::Text("7".into()));
        assert_eq!(optic.put(0, resolved), 7);
        assert_eq!(optic.put(3, ViewNode::Loader(pending)), 3);
    }
}
