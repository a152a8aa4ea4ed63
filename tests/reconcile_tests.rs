//! Tests for positional reconciliation against the in-memory host.

use mag::runtime::{Attribute, EditSender, HostEvent, MemoryHost, Reconciler};
use mag::view::{NodeKind, ViewNode};
use futures::channel::mpsc;
use rstest::{fixture, rstest};

struct Setup {
    host: MemoryHost,
    reconciler: Reconciler<MemoryHost>,
}

#[fixture]
fn setup() -> Setup {
    let host = MemoryHost::new();
    let reconciler = Reconciler::new(host.clone(), host.root());
    Setup { host, reconciler }
}

fn form(name: &str, agreed: bool) -> ViewNode {
    ViewNode::Container(vec![
        ViewNode::Text(format!("hello {name}")),
        ViewNode::Input(name.into()),
        ViewNode::Checkbox(agreed),
        ViewNode::button("save"),
    ])
}

#[rstest]
fn same_kinds_only_patch_attributes(setup: Setup) {
    let Setup {
        host,
        mut reconciler,
    } = setup;
    reconciler.mount(&form("ada", false));
    let before: Vec<_> = (0..4).map(|index| host.node_at(&[index])).collect();
    let created = host.created();

    reconciler.reconcile(&form("grace", true));

    let after: Vec<_> = (0..4).map(|index| host.node_at(&[index])).collect();
    assert_eq!(before, after);
    assert_eq!(host.replaced(), 0);
    assert_eq!(host.created(), created);

    let text = host.node_at(&[0]).unwrap();
    let input = host.node_at(&[1]).unwrap();
    let checkbox = host.node_at(&[2]).unwrap();
    assert_eq!(host.text(text), Some("hello grace".into()));
    assert_eq!(host.value(input), Some("grace".into()));
    assert_eq!(host.checked(checkbox), Some(true));
}

#[rstest]
fn unchanged_tree_restores_host_edited_values(setup: Setup) {
    let Setup {
        host,
        mut reconciler,
    } = setup;
    let tree = ViewNode::Container(vec![
        ViewNode::Input("ada".into()),
        ViewNode::NumberInput(3.0),
        ViewNode::Checkbox(false),
    ]);
    reconciler.mount(&tree);
    let input = host.node_at(&[0]).unwrap();
    let number = host.node_at(&[1]).unwrap();
    let checkbox = host.node_at(&[2]).unwrap();

    host.dispatch(input, HostEvent::Input("grace".into()));
    host.dispatch(number, HostEvent::Input("x".into()));
    host.dispatch(checkbox, HostEvent::Check(true));
    reconciler.reconcile(&tree);

    assert_eq!(host.value(input), Some("ada".into()));
    assert_eq!(host.number(number), Some(3.0));
    assert_eq!(host.checked(checkbox), Some(false));
}

#[rstest]
fn kind_change_replaces_only_that_position(setup: Setup) {
    let Setup {
        host,
        mut reconciler,
    } = setup;
    reconciler.mount(&ViewNode::Container(vec![
        ViewNode::Text("a".into()),
        ViewNode::Divider,
    ]));
    let first = host.node_at(&[0]);

    reconciler.reconcile(&ViewNode::Container(vec![
        ViewNode::Text("a".into()),
        ViewNode::NumberInput(2.0),
    ]));

    assert_eq!(host.node_at(&[0]), first);
    let replaced = host.node_at(&[1]).unwrap();
    assert_eq!(host.kind(replaced), Some(NodeKind::NumberInput));
    assert_eq!(host.number(replaced), Some(2.0));
    assert_eq!(host.replaced(), 1);
}

#[rstest]
fn root_kind_change_replaces_mounted_tree(setup: Setup) {
    let Setup {
        host,
        mut reconciler,
    } = setup;
    reconciler.mount(&ViewNode::Text("a".into()));
    reconciler.reconcile(&ViewNode::Container(vec![ViewNode::Break]));

    assert_eq!(host.children(host.root()).len(), 1);
    assert_eq!(host.kind(host.node_at(&[]).unwrap()), Some(NodeKind::Container));
    assert_eq!(host.kind(host.node_at(&[0]).unwrap()), Some(NodeKind::Break));
}

#[rstest]
#[case(1, 3)]
#[case(3, 1)]
#[case(2, 0)]
#[case(0, 2)]
fn child_count_follows_tree(setup: Setup, #[case] from: usize, #[case] to: usize) {
    let Setup {
        host,
        mut reconciler,
    } = setup;
    let texts = |count: usize| {
        ViewNode::Container((0..count).map(|index| ViewNode::Text(index.to_string())).collect())
    };

    reconciler.mount(&texts(from));
    reconciler.reconcile(&texts(to));

    let container = host.node_at(&[]).unwrap();
    let children = host.children(container);
    assert_eq!(children.len(), to);
    for (index, child) in children.into_iter().enumerate() {
        assert_eq!(host.text(child), Some(index.to_string()));
    }
    assert_eq!(host.replaced(), 0);
}

#[rstest]
fn appended_placeholders_are_replaced_by_other_kinds(setup: Setup) {
    let Setup {
        host,
        mut reconciler,
    } = setup;
    reconciler.mount(&ViewNode::Container(vec![]));
    reconciler.reconcile(&ViewNode::Container(vec![ViewNode::Checkbox(true)]));

    let child = host.node_at(&[0]).unwrap();
    assert_eq!(host.kind(child), Some(NodeKind::Checkbox));
    assert_eq!(host.attributes(child), vec![Attribute::Checked(true)]);
    assert_eq!(host.replaced(), 1);
}

#[rstest]
fn nested_containers_reconcile_recursively(setup: Setup) {
    let Setup {
        host,
        mut reconciler,
    } = setup;
    let nested = |inner: &str| {
        ViewNode::Container(vec![ViewNode::Container(vec![ViewNode::Preformatted(
            inner.into(),
        )])])
    };

    reconciler.mount(&nested("a"));
    let leaf = host.node_at(&[0, 0]);
    reconciler.reconcile(&nested("b"));

    assert_eq!(host.node_at(&[0, 0]), leaf);
    assert_eq!(host.text(leaf.unwrap()), Some("b".into()));
}

#[rstest]
fn listeners_are_replaced_on_reattach(setup: Setup) {
    let Setup {
        host,
        mut reconciler,
    } = setup;
    let tree = form("ada", false);
    reconciler.mount(&tree);

    let (sender, mut receiver) = mpsc::unbounded();
    reconciler.attach(&tree, &EditSender::new(sender.clone(), 0));
    assert_eq!(host.listener_count(), 3);

    reconciler.attach(&tree, &EditSender::new(sender, 1));
    assert_eq!(host.listener_count(), 3);

    let checkbox = host.node_at(&[2]).unwrap();
    assert!(host.dispatch(checkbox, HostEvent::Check(true)));
    let edit = receiver.try_next().unwrap().unwrap();
    assert_eq!(edit.cycle, 1);
    assert_eq!(edit.node, ViewNode::Checkbox(true));
}

#[rstest]
fn unmount_removes_tree_and_listeners(setup: Setup) {
    let Setup {
        host,
        mut reconciler,
    } = setup;
    let tree = form("ada", false);
    reconciler.mount(&tree);
    let (sender, _receiver) = mpsc::unbounded();
    reconciler.attach(&tree, &EditSender::new(sender, 0));

    reconciler.unmount();

    assert!(host.children(host.root()).is_empty());
    assert_eq!(host.listener_count(), 0);
}
