//! Tests for view trees and adapters.

use mag::optics::{Optic, Record};
use mag::view::{LoadError, Loader, NodeKind, Path, ViewNode, adapter};
use rstest::rstest;

fn form() -> ViewNode {
    ViewNode::Container(vec![
        ViewNode::Text("title".into()),
        ViewNode::Container(vec![ViewNode::Input("a".into()), ViewNode::Checkbox(false)]),
        ViewNode::Loader(Loader::ready(ViewNode::Divider)),
    ])
}

// =============================================================================
// Tree addressing
// =============================================================================

#[rstest]
#[case(&[], Some(NodeKind::Container))]
#[case(&[0], Some(NodeKind::Text))]
#[case(&[1, 1], Some(NodeKind::Checkbox))]
#[case(&[2], Some(NodeKind::Text))]
#[case(&[3], None)]
#[case(&[0, 0], None)]
fn at_resolves_paths(#[case] path: &[usize], #[case] expected: Option<NodeKind>) {
    assert_eq!(form().at(path).map(ViewNode::kind), expected);
}

#[rstest]
fn replace_at_swaps_one_node() {
    let mut tree = form();
    assert!(tree.replace_at(&[1, 0], ViewNode::Input("b".into())));
    assert_eq!(tree.at(&[1, 0]), Some(&ViewNode::Input("b".into())));
    assert_eq!(tree.at(&[1, 1]), Some(&ViewNode::Checkbox(false)));
}

#[rstest]
#[case(&[9])]
#[case(&[0, 1])]
fn replace_at_rejects_missing_paths(#[case] path: &[usize]) {
    let mut tree = form();
    assert!(!tree.replace_at(path, ViewNode::Divider));
    assert_eq!(tree.at(&[0]), form().at(&[0]));
}

#[rstest]
fn replace_at_empty_path_replaces_root() {
    let tree = form().with_replaced(&[], ViewNode::Break);
    assert_eq!(tree, ViewNode::Break);
}

#[rstest]
fn for_each_loader_reports_paths() {
    let mut found: Vec<Path> = Vec::new();
    form().for_each_loader(|path, _loader| found.push(path.clone()));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].as_slice(), &[2]);
}

#[rstest]
fn leaves_have_no_children() {
    assert!(ViewNode::Text("t".into()).children().is_empty());
    assert_eq!(form().children().len(), 3);
}

#[rstest]
#[case(NodeKind::NumberInput, "number-input")]
#[case(NodeKind::Preformatted, "preformatted")]
fn node_kinds_display_lowercase(#[case] kind: NodeKind, #[case] expected: &str) {
    assert_eq!(kind.to_string(), expected);
}

// =============================================================================
// Adapters
// =============================================================================

#[derive(Clone, Debug, PartialEq, Record)]
struct Settings {
    name: String,
    volume: f64,
    muted: bool,
}

fn settings() -> Settings {
    Settings {
        name: "desk".into(),
        volume: 0.5,
        muted: false,
    }
}

#[rstest]
fn adapters_render_and_write_back() {
    let muted = Settings::muted_optic().to(adapter::checkbox());
    let volume = Settings::volume_optic().to(adapter::number_input());

    assert_eq!(muted.get(&settings()), ViewNode::Checkbox(false));
    assert!(muted.put(settings(), ViewNode::Checkbox(true)).muted);
    assert_eq!(volume.put(settings(), ViewNode::NumberInput(0.75)).volume, 0.75);
}

#[rstest]
fn container_of_gathered_children() {
    let view = adapter::container().of(mag::gather![
        Settings::name_optic().to(adapter::input()),
        Settings::muted_optic().to(adapter::checkbox()),
    ]);

    let tree = view.get(&settings());
    assert_eq!(
        tree,
        ViewNode::Container(vec![ViewNode::Input("desk".into()), ViewNode::Checkbox(false)])
    );

    let edited = tree.with_replaced(&[1], ViewNode::Checkbox(true));
    assert_eq!(
        view.put(settings(), edited),
        Settings {
            muted: true,
            ..settings()
        }
    );
}

#[rstest]
fn text_and_preformatted_are_display_only() {
    let label = Settings::name_optic().to(adapter::text());
    assert_eq!(label.get(&settings()), ViewNode::Text("desk".into()));

    let dump = adapter::inspect::<Settings>();
    let ViewNode::Preformatted(text) = dump.get(&settings()) else {
        panic!("expected preformatted output");
    };
    assert!(text.contains("desk"));
}

#[rstest]
fn load_error_renders_message() {
    assert_eq!(
        LoadError::new("offline").into_node(),
        adapter::preformatted().get(&"offline".to_string())
    );
}

// =============================================================================
// Wire shape
// =============================================================================

#[cfg(feature = "serde")]
mod wire {
    use super::*;
    use serde_json::json;

    #[rstest]
    #[case(ViewNode::Text("hi".into()), json!({"Text": "hi"}))]
    #[case(ViewNode::button("+"), json!({"Button": {"label": "+", "clicked": false}}))]
    #[case(ViewNode::Divider, json!("Divider"))]
    #[case(ViewNode::NumberInput(1.5), json!({"NumberInput": 1.5}))]
    #[case(
        ViewNode::Container(vec![ViewNode::Break, ViewNode::Checkbox(true)]),
        json!({"Container": ["Break", {"Checkbox": true}]})
    )]
    fn nodes_serialize_externally_tagged(#[case] node: ViewNode, #[case] expected: serde_json::Value) {
        assert_eq!(serde_json::to_value(&node).unwrap(), expected);
        assert_eq!(serde_json::from_value::<ViewNode>(expected).unwrap(), node);
    }

    #[rstest]
    fn loaders_do_not_serialize() {
        let loader = ViewNode::Loader(Loader::ready(ViewNode::Divider));
        assert!(serde_json::to_value(&loader).is_err());
    }

    #[rstest]
    fn inspect_json_pretty_prints() {
        let dump = adapter::inspect_json::<Vec<u8>>();
        assert_eq!(
            dump.get(&vec![1, 2]),
            ViewNode::Preformatted("[\n  1,\n  2\n]".into())
        );
    }
}
